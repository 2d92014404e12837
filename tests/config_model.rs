use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use runwatch::cli::CliArgs;
use runwatch::config::validate::validate_config;
use runwatch::config::{ConfigFile, Settings};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn empty_config_uses_builtin_defaults() -> TestResult {
    let cfg: ConfigFile = toml::from_str("")?;

    assert_eq!(cfg.mounts.miseq, "/mnt/miseq");
    assert_eq!(cfg.mounts.nas, "/mnt/nas");
    assert_eq!(cfg.mounts.node, "/hdfs");
    assert_eq!(cfg.intake.folder, "To_Assemble");
    assert_eq!(cfg.cycle.sleep_secs, 1200);
    validate_config(&cfg)?;
    Ok(())
}

#[test]
fn partial_sections_fill_in_defaults() -> TestResult {
    let cfg: ConfigFile = toml::from_str(
        r#"
        [mounts]
        nas = "/srv/nas"

        [cycle]
        sleep_secs = 60
        "#,
    )?;

    assert_eq!(cfg.mounts.nas, "/srv/nas");
    assert_eq!(cfg.mounts.node, "/hdfs");
    assert_eq!(cfg.cycle.sleep_secs, 60);
    Ok(())
}

#[test]
fn zero_sleep_is_rejected() -> TestResult {
    let cfg: ConfigFile = toml::from_str("[cycle]\nsleep_secs = 0\n")?;
    assert!(validate_config(&cfg).is_err());
    Ok(())
}

#[test]
fn absolute_intake_folder_is_rejected() -> TestResult {
    let cfg: ConfigFile = toml::from_str("[intake]\nfolder = \"/mnt/nas/To_Assemble\"\n")?;
    assert!(validate_config(&cfg).is_err());
    Ok(())
}

#[test]
fn cli_flags_override_the_config_file() -> TestResult {
    let cfg: ConfigFile = toml::from_str("[mounts]\nnas = \"/srv/nas\"\n")?;
    let args = CliArgs::parse_from([
        "runwatch",
        "-n",
        "/mnt/other",
        "-a",
        "Inbox",
        "-s",
        "30",
    ]);

    let settings = Settings::from_sources(&args, &cfg);

    assert_eq!(settings.nas_root, PathBuf::from("/mnt/other"));
    assert_eq!(settings.intake_dir, PathBuf::from("/mnt/other/Inbox"));
    assert_eq!(settings.sleep, Duration::from_secs(30));
    // Unset flags fall through to the file / defaults.
    assert_eq!(settings.node_root, PathBuf::from("/hdfs"));
    Ok(())
}

#[test]
fn protected_paths_cover_the_dangerous_roots() -> TestResult {
    let cfg = ConfigFile::default();
    let args = CliArgs::parse_from(["runwatch"]);
    let settings = Settings::from_sources(&args, &cfg);

    let protected = settings.protected_paths();
    assert!(protected.contains(&PathBuf::from(Path::new("/"))));
    assert!(protected.contains(&settings.nas_root));
    assert!(protected.contains(&settings.intake_dir));
    assert!(protected.contains(&settings.node_root));
    Ok(())
}
