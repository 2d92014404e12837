// src/engine/cycle.rs

//! Stage and finalize phases for a single queued run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::fsops;
use crate::run::{self, Run};

/// Subfolder of a staged run where the pipeline writes its output.
pub const REPORTS_DIR: &str = "reports";

/// Report file whose presence is the authoritative success signal.
pub const SUCCESS_SIGNAL: &str = "combinedMetadata.csv";

/// What finalize did for one run.
#[derive(Debug, Clone)]
pub struct FinalizeReport {
    /// NAS directory the results were copied to (collision-resolved).
    pub target: PathBuf,
    /// Whether `reports/combinedMetadata.csv` was present in the staged copy.
    pub signal_present: bool,
    /// Whether the copy-back succeeded. When false, the staged copy and the
    /// original `_Queued` directory are left in place for manual recovery.
    pub copied_back: bool,
}

/// Copy a queued run from the NAS to the processing node.
///
/// Returns the staged directory. The NAS original stays in place (still
/// tagged `_Queued`) until finalize removes it. Any failure means the run is
/// not staged; the caller logs and moves on to the next run.
pub fn stage_run(queued: &Run, node_root: &Path) -> Result<PathBuf> {
    let desired = node_root.join(&queued.name);
    let dest = fsops::resolve_collision(&desired)
        .with_context(|| format!("resolving node destination for {}", queued.name))?;

    let copied = fsops::copy_tree(&queued.path, &dest)
        .with_context(|| format!("staging {} to {:?}", queued.name, dest))?;

    info!("staged {} to {:?} ({copied} files)", queued.name, dest);
    Ok(dest)
}

/// Copy results back to the NAS and clean up both copies of the run.
///
/// The success signal (`reports/combinedMetadata.csv`) is checked and logged
/// first, but result collection proceeds either way. Raw `*.fastq.gz` input
/// is stripped from the staged copy before the copy-back. Deletions happen
/// only after a successful copy-back and go through the protected delete.
pub fn finalize_run(
    queued: &Run,
    staged: &Path,
    intake_dir: &Path,
    protected: &[PathBuf],
) -> Result<FinalizeReport> {
    let signal = staged.join(REPORTS_DIR).join(SUCCESS_SIGNAL);
    let signal_present = signal.is_file();
    if signal_present {
        info!("{} assembled successfully ({:?} present)", queued.name, signal);
    } else {
        error!(
            "{} assembly appears to have failed ({:?} missing), collecting results anyway",
            queued.name, signal
        );
    }

    let desired = intake_dir.join(run::assembled_name(&queued.name));
    let target = fsops::resolve_collision(&desired)
        .with_context(|| format!("resolving NAS target for {}", queued.name))?;

    let pruned = fsops::prune_fastq_gz(staged)
        .with_context(|| format!("pruning fastq.gz files from {:?}", staged))?;
    if pruned > 0 {
        info!("pruned {pruned} fastq.gz file(s) from {:?}", staged);
    }

    if let Err(err) = fsops::copy_tree(staged, &target) {
        // Leave both the staged copy and the NAS original for manual
        // recovery; deleting after a failed copy-back would lose the run.
        error!(
            "copying results of {} back to {:?} failed: {err:#}; skipping cleanup",
            queued.name, target
        );
        return Ok(FinalizeReport {
            target,
            signal_present,
            copied_back: false,
        });
    }
    info!("copied results of {} to {:?}", queued.name, target);

    if let Err(err) = fsops::remove_tree_protected(staged, protected) {
        warn!("failed to remove staged copy {:?}: {err:#}", staged);
    }
    if let Err(err) = fsops::remove_tree_protected(&queued.path, protected) {
        warn!("failed to remove NAS original {:?}: {err:#}", queued.path);
    }

    Ok(FinalizeReport {
        target,
        signal_present,
        copied_back: true,
    })
}
