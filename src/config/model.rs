// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [mounts]
/// miseq = "/mnt/miseq"
/// nas = "/mnt/nas"
/// node = "/hdfs"
///
/// [intake]
/// folder = "To_Assemble"
///
/// [pipeline]
/// command = "/usr/local/bin/assemble"
/// reference = "/mnt/nas/assemblydatabases"
///
/// [cycle]
/// sleep_secs = 1200
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Mount points from `[mounts]`.
    #[serde(default)]
    pub mounts: MountsSection,

    /// Intake folder settings from `[intake]`.
    #[serde(default)]
    pub intake: IntakeSection,

    /// External pipeline invocation from `[pipeline]`.
    #[serde(default)]
    pub pipeline: PipelineSection,

    /// Loop pacing from `[cycle]`.
    #[serde(default)]
    pub cycle: CycleSection,
}

/// `[mounts]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MountsSection {
    /// Mount point of the MiSeq instrument. Retained for compatibility;
    /// the core loop does not read from it.
    #[serde(default = "default_miseq_mount")]
    pub miseq: String,

    /// Mount point of the shared NAS.
    #[serde(default = "default_nas_mount")]
    pub nas: String,

    /// Mount point of the destination folder on the processing node.
    #[serde(default = "default_node_mount")]
    pub node: String,
}

fn default_miseq_mount() -> String {
    "/mnt/miseq".to_string()
}

fn default_nas_mount() -> String {
    "/mnt/nas".to_string()
}

fn default_node_mount() -> String {
    "/hdfs".to_string()
}

impl Default for MountsSection {
    fn default() -> Self {
        Self {
            miseq: default_miseq_mount(),
            nas: default_nas_mount(),
            node: default_node_mount(),
        }
    }
}

/// `[intake]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeSection {
    /// Name of the folder containing run directories to be assembled.
    /// Must be a folder name directly under the NAS mount, e.g.
    /// `/mnt/nas/To_Assemble`.
    #[serde(default = "default_intake_folder")]
    pub folder: String,
}

fn default_intake_folder() -> String {
    "To_Assemble".to_string()
}

impl Default for IntakeSection {
    fn default() -> Self {
        Self {
            folder: default_intake_folder(),
        }
    }
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSection {
    /// Path of the external assembly executable.
    #[serde(default = "default_pipeline_command")]
    pub command: String,

    /// Fixed auxiliary-resource path, passed as the first positional
    /// argument on every invocation.
    #[serde(default = "default_pipeline_reference")]
    pub reference: String,
}

fn default_pipeline_command() -> String {
    "assemble".to_string()
}

fn default_pipeline_reference() -> String {
    "/mnt/nas/assemblydatabases".to_string()
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            command: default_pipeline_command(),
            reference: default_pipeline_reference(),
        }
    }
}

/// `[cycle]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CycleSection {
    /// Seconds to sleep between each search for new runs.
    #[serde(default = "default_sleep_secs")]
    pub sleep_secs: u64,
}

fn default_sleep_secs() -> u64 {
    1200
}

impl Default for CycleSection {
    fn default() -> Self {
        Self {
            sleep_secs: default_sleep_secs(),
        }
    }
}
