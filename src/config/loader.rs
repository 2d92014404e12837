// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::model::ConfigFile;
use crate::config::validate::validate_config;

/// Load a configuration file from a given path and return the raw `ConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file at {:?}", path))?;

    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML config from {:?}", path))?;

    Ok(config)
}

/// Load a configuration file from path and run basic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML, applying defaults via `serde` + `Default` impls.
/// - Checks mount paths, intake folder name and pacing values.
///
/// If `path` is `None` and the default config file does not exist, the
/// built-in defaults are returned instead (the tool is fully usable from
/// CLI flags alone). An explicitly given `--config` path must exist.
pub fn load_and_validate(path: Option<&str>) -> Result<ConfigFile> {
    let config = match path {
        Some(p) => load_from_path(p)?,
        None => {
            let default = default_config_path();
            if default.is_file() {
                load_from_path(&default)?
            } else {
                debug!("no {:?} found, using built-in defaults", default);
                ConfigFile::default()
            }
        }
    };
    validate_config(&config)?;
    Ok(config)
}

/// Helper to resolve the default config path.
///
/// Currently this just returns `Runwatch.toml` in the current working
/// directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Runwatch.toml")
}
