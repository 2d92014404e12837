// src/intake/mod.rs

//! Intake phase: scan the NAS intake folder and tag eligible runs.
//!
//! A candidate is a subdirectory whose name carries `_Ready` but not yet
//! `_Queued` or `_Assembled`. Eligible candidates are renamed in place with
//! `_Queued` appended and returned to the caller; at most
//! [`MAX_QUEUED_PER_CYCLE`] runs are admitted per scan, the rest wait for
//! the next cycle.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use tracing::{info, warn};

use crate::run::{self, Run, RunState};

/// Per-cycle admission cap. Once this many runs have been tagged in one
/// scan, further eligible runs are silently left untagged until the next
/// cycle.
pub const MAX_QUEUED_PER_CYCLE: usize = 10;

/// Metadata files expected inside a ready run. Absence is warned about but
/// does not block queueing.
pub const METADATA_FILES: [&str; 3] = [
    "RunInfo.xml",
    "SampleSheet.csv",
    "GenerateFASTQRunStatistics.xml",
];

/// Scan the intake folder and tag eligible runs with `_Queued`.
///
/// Returns the verified list for this cycle, in modification-time order.
/// Per-run problems (unreadable directory, failed rename) are logged and
/// skip that run only.
pub fn scan_and_tag(intake_dir: &Path) -> Result<Vec<Run>> {
    info!("checking {:?} for unassembled runs", intake_dir);

    let candidates = discover_runs(intake_dir)?;
    if candidates.is_empty() {
        info!("no runs to process");
        return Ok(Vec::new());
    }

    let fastq = Glob::new("*fastq*")
        .context("compiling fastq glob")?
        .compile_matcher();

    let mut verified: Vec<Run> = Vec::new();
    for candidate in candidates {
        match candidate.state() {
            RunState::Queued | RunState::Assembled => continue,
            RunState::Incoming => {
                warn!("{} is present but not flagged as _Ready", candidate.name);
                continue;
            }
            RunState::Ready => {}
        }

        match dir_has_fastq(&candidate.path, &fastq) {
            Ok(true) => {}
            Ok(false) => {
                warn!("{} contains no fastq files to assemble", candidate.name);
                continue;
            }
            Err(err) => {
                warn!("skipping {}: {err:#}", candidate.name);
                continue;
            }
        }

        let missing = missing_metadata(&candidate.path);
        if !missing.is_empty() {
            warn!(
                "{} is missing metadata files: {}",
                candidate.name,
                missing.join(", ")
            );
        }

        // Admission cap reached: leave the run untagged for the next cycle.
        if verified.len() >= MAX_QUEUED_PER_CYCLE {
            continue;
        }

        let new_name = run::queued_name(&candidate.name);
        let new_path = candidate.path.with_file_name(&new_name);
        if let Err(err) = fs::rename(&candidate.path, &new_path) {
            warn!("failed to queue {}: {err}", candidate.name);
            continue;
        }
        info!("queued {} as {}", candidate.name, new_name);

        verified.push(Run {
            path: new_path,
            name: new_name,
            modified: candidate.modified,
        });
    }

    if verified.is_empty() {
        info!("no eligible runs queued this cycle");
    } else {
        let names: Vec<&str> = verified.iter().map(|r| r.name.as_str()).collect();
        info!("queued {} run(s): {}", verified.len(), names.join(", "));
    }

    Ok(verified)
}

/// Subdirectories of the intake folder, sorted by modification time
/// ascending. Non-directories are ignored.
fn discover_runs(intake_dir: &Path) -> Result<Vec<Run>> {
    let entries = fs::read_dir(intake_dir)
        .with_context(|| format!("reading intake folder {:?}", intake_dir))?;

    let mut runs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {:?}", intake_dir))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        match Run::from_dir(path) {
            Ok(run) => runs.push(run),
            Err(err) => warn!("skipping unreadable entry: {err:#}"),
        }
    }

    runs.sort_by_key(|r| r.modified);
    Ok(runs)
}

fn dir_has_fastq(dir: &Path, fastq: &GlobMatcher) -> Result<bool> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading run directory {:?}", dir))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {:?}", dir))?;
        if entry.path().is_file() && fastq.is_match(entry.file_name()) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn missing_metadata(dir: &Path) -> Vec<String> {
    METADATA_FILES
        .iter()
        .filter(|name| !dir.join(name).is_file())
        .map(|name| name.to_string())
        .collect()
}
