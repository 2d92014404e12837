// src/engine/runtime.rs

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::engine::cycle;
use crate::engine::pacing;
use crate::exec::PipelineCommand;
use crate::intake;
use crate::run::Run;

/// Folder under the NAS root where assembly log output accumulates. Ensured
/// to exist at startup.
pub const ASSEMBLY_LOGS_DIR: &str = "AssemblyLogs";

/// The main polling loop.
///
/// Each cycle runs four phases strictly in sequence: intake the eligible
/// runs, then for each queued run stage it to the node, invoke the pipeline
/// on it, and finalize it back to the NAS. Runs are handled one at a time in
/// modification-time order; the only suspension points are the blocking wait
/// on the pipeline process and the inter-cycle pacing sleep.
///
/// No per-run failure may terminate the loop: every phase catches, logs and
/// moves on to the next run or the next cycle.
pub struct Runtime {
    settings: Settings,
    pipeline: PipelineCommand,
}

impl Runtime {
    pub fn new(settings: Settings) -> Self {
        let pipeline = PipelineCommand::new(
            &settings.pipeline_command,
            &settings.pipeline_reference,
        );
        Self { settings, pipeline }
    }

    /// Run forever (or once with `--once`). Ctrl-C is honored during the
    /// pacing sleep; there is no mid-run cancellation.
    pub async fn run(self) -> Result<()> {
        info!(
            "runwatch started, watching {:?} (node root {:?})",
            self.settings.intake_dir, self.settings.node_root
        );

        let log_dir = self.settings.nas_root.join(ASSEMBLY_LOGS_DIR);
        if let Err(err) = fs::create_dir_all(&log_dir) {
            warn!("failed to create assembly log folder {:?}: {err}", log_dir);
        }

        loop {
            self.run_cycle().await;

            if self.settings.once {
                info!("single cycle complete, exiting (--once)");
                break;
            }

            info!(
                "cycle complete, sleeping for {}",
                pacing::format_mm_ss(self.settings.sleep)
            );
            tokio::select! {
                _ = pacing::sleep_with_progress(self.settings.sleep, pacing::PROGRESS_INTERVAL) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown requested, stopping loop");
                    break;
                }
            }
        }

        info!("runwatch exiting");
        Ok(())
    }

    /// One full cycle: intake, then stage/process/finalize each verified run.
    pub async fn run_cycle(&self) {
        let runs = match intake::scan_and_tag(&self.settings.intake_dir) {
            Ok(runs) => runs,
            Err(err) => {
                error!("intake scan failed: {err:#}");
                return;
            }
        };

        let protected = self.settings.protected_paths();
        for run in &runs {
            self.assemble_one(run, &protected).await;
        }
    }

    /// Stage, process and finalize a single queued run. Never propagates;
    /// every failure is logged here and the caller continues with the next
    /// run.
    async fn assemble_one(&self, queued: &Run, protected: &[PathBuf]) {
        let staged = match cycle::stage_run(queued, &self.settings.node_root) {
            Ok(staged) => staged,
            Err(err) => {
                error!("staging {} failed: {err:#}", queued.name);
                return;
            }
        };

        // Exit status is logged inside; finalize's result-file check is the
        // authoritative success signal, so processing continues regardless.
        let _outcome = self.pipeline.run(&staged).await;

        match cycle::finalize_run(queued, &staged, &self.settings.intake_dir, protected) {
            Ok(report) => {
                info!(
                    "finalized {} -> {:?} (signal: {}, copied back: {})",
                    queued.name, report.target, report.signal_present, report.copied_back
                );
            }
            Err(err) => {
                error!("finalizing {} failed: {err:#}", queued.name);
            }
        }
    }
}
