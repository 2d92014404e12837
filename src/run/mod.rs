// src/run/mod.rs

//! Run directories and their lifecycle state.
//!
//! A run's state lives in its directory name as a suffix: external producers
//! drop `<base>_Ready` directories, intake renames them to
//! `<base>_Ready_Queued`, and finalize creates `<base>_Assembled`. The suffix
//! set only ever grows; a run is never un-tagged. Decoding is a substring
//! check so that collision suffixes (`_1`..`_99`) appended by stage/finalize
//! do not change a name's state.

use std::path::PathBuf;
use std::time::SystemTime;

use anyhow::{Context, Result};

pub const READY_TAG: &str = "_Ready";
pub const QUEUED_TAG: &str = "_Queued";
pub const ASSEMBLED_TAG: &str = "_Assembled";

/// Lifecycle state of a run, decoded from its directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No lifecycle tag yet; the producer has not finished depositing it.
    Incoming,
    /// Tagged `_Ready` by the producer, eligible for intake.
    Ready,
    /// Tagged `_Queued` by intake; owned by this process from here on.
    Queued,
    /// Results directory created by finalize.
    Assembled,
}

impl RunState {
    /// Decode the state of a directory leaf name.
    ///
    /// `_Assembled` and `_Queued` dominate `_Ready`, so a compound
    /// `_Ready_Queued` name decodes as `Queued`.
    pub fn of_name(name: &str) -> Self {
        if name.contains(ASSEMBLED_TAG) {
            RunState::Assembled
        } else if name.contains(QUEUED_TAG) {
            RunState::Queued
        } else if name.contains(READY_TAG) {
            RunState::Ready
        } else {
            RunState::Incoming
        }
    }
}

/// Name of the run with all lifecycle tags stripped.
pub fn base_name(name: &str) -> &str {
    let cut = [READY_TAG, QUEUED_TAG, ASSEMBLED_TAG]
        .iter()
        .filter_map(|tag| name.find(tag))
        .min();
    match cut {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Encode the queued form of a name: append `_Queued`.
pub fn queued_name(name: &str) -> String {
    format!("{name}{QUEUED_TAG}")
}

/// Encode the assembled form of a name: `<base>_Assembled`, dropping any
/// `_Ready`/`_Queued` tags already present.
pub fn assembled_name(name: &str) -> String {
    format!("{}{}", base_name(name), ASSEMBLED_TAG)
}

/// One run directory discovered under the intake root.
#[derive(Debug, Clone)]
pub struct Run {
    /// Full path of the directory.
    pub path: PathBuf,
    /// Leaf directory name; carries the state suffix.
    pub name: String,
    /// Modification time, used for discovery ordering.
    pub modified: SystemTime,
}

impl Run {
    pub fn from_dir(path: PathBuf) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("directory {:?} has no leaf name", path))?;
        let modified = path
            .metadata()
            .and_then(|m| m.modified())
            .with_context(|| format!("reading modification time of {:?}", path))?;
        Ok(Self {
            path,
            name,
            modified,
        })
    }

    pub fn state(&self) -> RunState {
        RunState::of_name(&self.name)
    }
}
