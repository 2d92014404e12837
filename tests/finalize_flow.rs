use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use runwatch::engine::cycle::{finalize_run, stage_run};
use runwatch::run::Run;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

struct Fixture {
    _tmp: TempDir,
    intake: PathBuf,
    node: PathBuf,
    protected: Vec<PathBuf>,
}

/// NAS intake folder plus a node root, with the protected set a real
/// deployment would derive from its settings.
fn fixture() -> Fixture {
    let tmp = tempfile::tempdir().unwrap();
    let intake = tmp.path().join("To_Assemble");
    let node = tmp.path().join("node");
    fs::create_dir_all(&intake).unwrap();
    fs::create_dir_all(&node).unwrap();
    let protected = vec![tmp.path().to_path_buf(), intake.clone(), node.clone()];
    Fixture {
        _tmp: tmp,
        intake,
        node,
        protected,
    }
}

/// A queued run on the NAS plus its staged copy on the node, as stage and
/// the pipeline would have left them.
fn queued_and_staged(fx: &Fixture, with_signal: bool) -> (Run, PathBuf) {
    let origin = fx.intake.join("Run1_Ready_Queued");
    fs::create_dir_all(&origin).unwrap();
    fs::write(origin.join("sample.fastq.gz"), b"reads").unwrap();
    fs::write(origin.join("RunInfo.xml"), b"<x/>").unwrap();

    let queued = Run::from_dir(origin).unwrap();
    let staged = stage_run(&queued, &fx.node).unwrap();

    fs::write(staged.join("b.bam"), b"aligned").unwrap();
    if with_signal {
        fs::create_dir_all(staged.join("reports")).unwrap();
        fs::write(staged.join("reports").join("combinedMetadata.csv"), b"csv").unwrap();
    }
    (queued, staged)
}

#[test]
fn staging_copies_without_touching_the_original() -> TestResult {
    let fx = fixture();
    let (queued, staged) = queued_and_staged(&fx, false);

    assert_eq!(staged, fx.node.join("Run1_Ready_Queued"));
    assert!(staged.join("sample.fastq.gz").is_file());
    // The NAS original stays in place until finalize removes it.
    assert!(queued.path.join("sample.fastq.gz").is_file());
    Ok(())
}

#[test]
fn staging_into_taken_destination_uses_suffix() -> TestResult {
    let fx = fixture();
    fs::create_dir_all(fx.node.join("Run1_Ready_Queued"))?;
    let (_, staged) = queued_and_staged(&fx, false);

    assert_eq!(staged, fx.node.join("Run1_Ready_Queued_1"));
    Ok(())
}

#[test]
fn finalize_with_signal_copies_back_and_cleans_up() -> TestResult {
    let fx = fixture();
    let (queued, staged) = queued_and_staged(&fx, true);

    let report = finalize_run(&queued, &staged, &fx.intake, &fx.protected)?;

    assert!(report.signal_present);
    assert!(report.copied_back);

    let target = fx.intake.join("Run1_Assembled");
    assert_eq!(report.target, target);
    assert!(target.join("b.bam").is_file());
    assert!(target.join("reports").join("combinedMetadata.csv").is_file());
    // Raw input never comes back to the NAS.
    assert!(!target.join("sample.fastq.gz").exists());
    // Both copies of the queued run are gone.
    assert!(!staged.exists());
    assert!(!queued.path.exists());
    Ok(())
}

#[test]
fn finalize_without_signal_still_collects_and_cleans_up() -> TestResult {
    let fx = fixture();
    let (queued, staged) = queued_and_staged(&fx, false);

    let report = finalize_run(&queued, &staged, &fx.intake, &fx.protected)?;

    assert!(!report.signal_present);
    assert!(report.copied_back);
    assert!(fx.intake.join("Run1_Assembled").join("b.bam").is_file());
    assert!(!staged.exists());
    assert!(!queued.path.exists());
    Ok(())
}

#[test]
fn finalize_target_collision_probes_suffix() -> TestResult {
    let fx = fixture();
    fs::create_dir_all(fx.intake.join("Run1_Assembled"))?;
    let (queued, staged) = queued_and_staged(&fx, true);

    let report = finalize_run(&queued, &staged, &fx.intake, &fx.protected)?;

    assert_eq!(report.target, fx.intake.join("Run1_Assembled_1"));
    assert!(report.target.join("b.bam").is_file());
    Ok(())
}

#[test]
fn finalize_strips_all_fastq_gz_before_copy_back() -> TestResult {
    let fx = fixture();
    let (queued, staged) = queued_and_staged(&fx, true);
    fs::create_dir_all(staged.join("raw"))?;
    fs::write(staged.join("raw").join("extra.fastq.gz"), b"reads")?;

    let report = finalize_run(&queued, &staged, &fx.intake, &fx.protected)?;

    assert!(no_fastq_gz_under(&report.target));
    assert!(report.target.join("b.bam").is_file());
    Ok(())
}

#[test]
fn failed_copy_back_skips_both_deletions() -> TestResult {
    let fx = fixture();
    let (queued, staged) = queued_and_staged(&fx, true);

    // A regular file where the NAS outbox should be makes the copy-back
    // fail; both copies of the run must survive for manual recovery.
    let bogus_intake = fx._tmp.path().join("not_a_dir");
    fs::write(&bogus_intake, b"x")?;

    let report = finalize_run(&queued, &staged, &bogus_intake, &fx.protected)?;

    assert!(report.signal_present);
    assert!(!report.copied_back);
    assert!(staged.join("b.bam").is_file());
    assert!(queued.path.join("sample.fastq.gz").is_file());
    Ok(())
}

#[test]
fn failed_staging_leaves_the_original_queued() -> TestResult {
    let fx = fixture();
    let origin = fx.intake.join("Run1_Ready_Queued");
    fs::create_dir_all(&origin)?;
    fs::write(origin.join("sample.fastq.gz"), b"reads")?;
    let queued = Run::from_dir(origin.clone())?;

    let bogus_node = fx._tmp.path().join("node_file");
    fs::write(&bogus_node, b"x")?;

    assert!(stage_run(&queued, &bogus_node).is_err());
    assert!(origin.join("sample.fastq.gz").is_file());
    Ok(())
}

fn no_fastq_gz_under(dir: &Path) -> bool {
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in fs::read_dir(&current).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else if path.to_string_lossy().ends_with(".fastq.gz") {
                return false;
            }
        }
    }
    true
}
