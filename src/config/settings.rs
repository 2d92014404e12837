// src/config/settings.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::CliArgs;
use crate::config::model::ConfigFile;

/// Resolved runtime settings.
///
/// Built once at startup from the config file with CLI flags layered on top,
/// then passed by reference everywhere. There is no other process-wide
/// mutable state.
#[derive(Debug, Clone)]
pub struct Settings {
    /// MiSeq instrument mount. Retained for compatibility; unused by the loop.
    pub miseq_mount: PathBuf,

    /// Shared NAS mount.
    pub nas_root: PathBuf,

    /// Destination root on the processing node.
    pub node_root: PathBuf,

    /// Folder under `nas_root` holding runs to assemble.
    pub intake_dir: PathBuf,

    /// External assembly executable.
    pub pipeline_command: PathBuf,

    /// Auxiliary resource path, first positional argument to the pipeline.
    pub pipeline_reference: PathBuf,

    /// Pause between cycles.
    pub sleep: Duration,

    /// Exit after a single cycle instead of looping.
    pub once: bool,
}

impl Settings {
    /// Merge CLI arguments over a loaded (or default) config file.
    pub fn from_sources(args: &CliArgs, cfg: &ConfigFile) -> Self {
        let miseq = args.miseq_mount.as_deref().unwrap_or(&cfg.mounts.miseq);
        let nas = args.nas_mount.as_deref().unwrap_or(&cfg.mounts.nas);
        let node = args.node_mount.as_deref().unwrap_or(&cfg.mounts.node);
        let folder = args.intake_folder.as_deref().unwrap_or(&cfg.intake.folder);
        let pipeline = args.pipeline.as_deref().unwrap_or(&cfg.pipeline.command);
        let reference = args.reference.as_deref().unwrap_or(&cfg.pipeline.reference);
        let sleep_secs = args.sleep_secs.unwrap_or(cfg.cycle.sleep_secs);

        let nas_root = PathBuf::from(nas);
        let intake_dir = nas_root.join(folder);

        Self {
            miseq_mount: PathBuf::from(miseq),
            nas_root,
            node_root: PathBuf::from(node),
            intake_dir,
            pipeline_command: PathBuf::from(pipeline),
            pipeline_reference: PathBuf::from(reference),
            sleep: Duration::from_secs(sleep_secs),
            once: args.once,
        }
    }

    /// Paths the guarded delete must never remove: the filesystem root, the
    /// NAS mount, the intake folder and the node root. A path-join bug
    /// anywhere else must not be able to turn into a top-level deletion.
    pub fn protected_paths(&self) -> Vec<PathBuf> {
        vec![
            PathBuf::from(Path::new("/")),
            self.nas_root.clone(),
            self.intake_dir.clone(),
            self.node_root.clone(),
        ]
    }
}
