// src/config/validate.rs

use std::path::Path;

use anyhow::{anyhow, Result};

use crate::config::model::ConfigFile;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - mount paths are non-empty
/// - the intake folder is a plain name, not an absolute path
/// - `sleep_secs >= 1`
/// - the pipeline command is non-empty
///
/// It does **not** check that the mounts actually exist; they may only be
/// mounted later, and the main loop tolerates a temporarily missing intake
/// folder.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_mounts(cfg)?;
    validate_intake(cfg)?;
    validate_pipeline(cfg)?;
    validate_cycle(cfg)?;
    Ok(())
}

fn validate_mounts(cfg: &ConfigFile) -> Result<()> {
    if cfg.mounts.nas.trim().is_empty() {
        return Err(anyhow!("[mounts].nas must not be empty"));
    }
    if cfg.mounts.node.trim().is_empty() {
        return Err(anyhow!("[mounts].node must not be empty"));
    }
    Ok(())
}

fn validate_intake(cfg: &ConfigFile) -> Result<()> {
    let folder = cfg.intake.folder.trim();
    if folder.is_empty() {
        return Err(anyhow!("[intake].folder must not be empty"));
    }
    if Path::new(folder).is_absolute() {
        return Err(anyhow!(
            "[intake].folder must be a folder name under the NAS mount, \
             not an absolute path (got {:?})",
            folder
        ));
    }
    Ok(())
}

fn validate_pipeline(cfg: &ConfigFile) -> Result<()> {
    if cfg.pipeline.command.trim().is_empty() {
        return Err(anyhow!("[pipeline].command must not be empty"));
    }
    Ok(())
}

fn validate_cycle(cfg: &ConfigFile) -> Result<()> {
    if cfg.cycle.sleep_secs == 0 {
        return Err(anyhow!("[cycle].sleep_secs must be >= 1 (got 0)"));
    }
    Ok(())
}
