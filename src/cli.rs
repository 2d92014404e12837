// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Every mount/path option can also come from the TOML config file; a flag
//! given on the command line wins over the file. See `config::settings`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `runwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "runwatch",
    version,
    about = "Watch a NAS folder for sequencing runs and drive an assembly pipeline.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Runwatch.toml` in the current working directory. If the
    /// default file does not exist, built-in defaults are used instead.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Mount point of the MiSeq instrument (retained, unused by the core loop).
    #[arg(short = 'm', long, value_name = "PATH")]
    pub miseq_mount: Option<String>,

    /// Mount point of the shared NAS.
    #[arg(short = 'n', long, value_name = "PATH")]
    pub nas_mount: Option<String>,

    /// Mount point of the destination folder on the processing node.
    #[arg(short = 'd', long, value_name = "PATH")]
    pub node_mount: Option<String>,

    /// Name of the folder under the NAS mount containing runs to assemble.
    #[arg(short = 'a', long, value_name = "NAME")]
    pub intake_folder: Option<String>,

    /// Seconds to sleep between each search for new runs.
    #[arg(short = 's', long, value_name = "SECS")]
    pub sleep_secs: Option<u64>,

    /// Path of the external assembly pipeline executable.
    #[arg(long, value_name = "PATH")]
    pub pipeline: Option<String>,

    /// Auxiliary resource path passed to the pipeline as its first argument.
    #[arg(long, value_name = "PATH")]
    pub reference: Option<String>,

    /// Run a single intake/assemble cycle and exit instead of looping.
    #[arg(long)]
    pub once: bool,

    /// Print the resolved settings and exit without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
