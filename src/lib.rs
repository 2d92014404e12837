// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fsops;
pub mod intake;
pub mod logging;
pub mod run;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::Settings;
use crate::engine::Runtime;
use crate::errors::Result;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (TOML file + CLI overrides)
/// - the resolved `Settings` value object
/// - the polling runtime
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(args.config.as_deref())?;
    let settings = Settings::from_sources(&args, &cfg);

    if args.dry_run {
        print_dry_run(&settings);
        return Ok(());
    }

    let runtime = Runtime::new(settings);
    runtime.run().await
}

/// Simple dry-run output: print the resolved settings, execute nothing.
fn print_dry_run(settings: &Settings) {
    println!("runwatch dry-run");
    println!("  miseq mount:        {:?}", settings.miseq_mount);
    println!("  nas root:           {:?}", settings.nas_root);
    println!("  intake folder:      {:?}", settings.intake_dir);
    println!("  node root:          {:?}", settings.node_root);
    println!("  pipeline command:   {:?}", settings.pipeline_command);
    println!("  pipeline reference: {:?}", settings.pipeline_reference);
    println!("  sleep between cycles: {}s", settings.sleep.as_secs());
    println!("  once: {}", settings.once);
    println!();
    println!("protected paths (never deleted):");
    for p in settings.protected_paths() {
        println!("  - {:?}", p);
    }
}
