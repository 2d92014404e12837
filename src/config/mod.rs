// src/config/mod.rs

//! Configuration handling.
//!
//! - [`model`] maps the TOML file into serde structs with defaults.
//! - [`loader`] reads and validates a config file.
//! - [`validate`] holds the semantic checks.
//! - [`settings`] merges CLI flags over the file into the resolved
//!   [`Settings`] value object that the runtime is constructed with.

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use model::{ConfigFile, CycleSection, IntakeSection, MountsSection, PipelineSection};
pub use settings::Settings;
