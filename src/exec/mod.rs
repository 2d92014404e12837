// src/exec/mod.rs

//! Process execution layer.
//!
//! [`pipeline`] owns the single external invocation this daemon makes: the
//! assembly pipeline run against a staged run directory, using
//! `tokio::process::Command`.

pub mod pipeline;

pub use pipeline::{PipelineCommand, PipelineOutcome};
