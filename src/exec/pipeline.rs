// src/exec/pipeline.rs

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, error, info};

/// The external assembly pipeline executable and its fixed auxiliary
/// resource path.
///
/// The pipeline is invoked with two positional arguments: the reference
/// path, then the staged run directory.
#[derive(Debug, Clone)]
pub struct PipelineCommand {
    program: PathBuf,
    reference: PathBuf,
}

/// Result of one pipeline invocation.
///
/// The exit status is advisory only: finalize's own result-file check is the
/// authoritative success signal, so none of these variants stops the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Success,
    Failed(i32),
    LaunchFailed(String),
}

impl PipelineCommand {
    pub fn new(program: impl Into<PathBuf>, reference: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            reference: reference.into(),
        }
    }

    /// Run the pipeline against a staged run directory, blocking until the
    /// process exits.
    ///
    /// All failure modes are logged and folded into the returned outcome;
    /// nothing propagates past this boundary.
    pub async fn run(&self, staged_dir: &Path) -> PipelineOutcome {
        info!(
            "starting assembly pipeline {:?} on {:?}",
            self.program, staged_dir
        );

        let mut cmd = Command::new(&self.program);
        cmd.arg(&self.reference)
            .arg(staged_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                error!("failed to launch pipeline {:?}: {err}", self.program);
                return PipelineOutcome::LaunchFailed(err.to_string());
            }
        };

        // Drain both streams so the child never blocks on a full pipe.
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(async move {
                let reader = BufReader::new(stdout);
                let mut lines = reader.lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!("pipeline stdout: {line}");
                }
            });
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let reader = BufReader::new(stderr);
                let mut lines = reader.lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!("pipeline stderr: {line}");
                }
            });
        }

        let status = match child.wait().await {
            Ok(status) => status,
            Err(err) => {
                error!("failed waiting for pipeline process: {err}");
                return PipelineOutcome::LaunchFailed(err.to_string());
            }
        };

        let code = status.code().unwrap_or(-1);
        if status.success() {
            info!("pipeline finished successfully on {:?}", staged_dir);
            PipelineOutcome::Success
        } else {
            error!(
                "pipeline exited with code {code} on {:?} (continuing to finalize)",
                staged_dir
            );
            PipelineOutcome::Failed(code)
        }
    }
}
