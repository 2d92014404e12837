use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use runwatch::fsops::{remove_tree_protected, DeleteOutcome};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn filesystem_root_is_always_refused() -> TestResult {
    // Even with an empty protected set the root itself is never deletable.
    let outcome = remove_tree_protected(Path::new("/"), &[])?;
    assert_eq!(outcome, DeleteOutcome::Refused);
    Ok(())
}

#[test]
fn protected_roots_are_refused_and_untouched() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let intake = tmp.path().join("To_Assemble");
    fs::create_dir_all(intake.join("Run1_Ready"))?;

    let protected = vec![tmp.path().to_path_buf(), intake.clone()];

    assert_eq!(
        remove_tree_protected(&intake, &protected)?,
        DeleteOutcome::Refused
    );
    assert_eq!(
        remove_tree_protected(tmp.path(), &protected)?,
        DeleteOutcome::Refused
    );
    assert!(intake.join("Run1_Ready").is_dir());
    Ok(())
}

#[test]
fn non_normalized_spelling_of_protected_root_is_refused() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let intake = tmp.path().join("To_Assemble");
    fs::create_dir_all(intake.join("sub"))?;

    let protected = vec![intake.clone()];

    // `To_Assemble/sub/..` resolves to the intake root; the guard compares
    // canonical paths, so this spelling must be refused too.
    let sneaky: PathBuf = intake.join("sub").join("..");
    assert_eq!(
        remove_tree_protected(&sneaky, &protected)?,
        DeleteOutcome::Refused
    );
    assert!(intake.is_dir());
    Ok(())
}

#[test]
fn unprotected_directory_is_removed_recursively() -> TestResult {
    let tmp = tempfile::tempdir()?;
    let doomed = tmp.path().join("Run1_Ready_Queued");
    fs::create_dir_all(doomed.join("reports"))?;
    fs::write(doomed.join("reports").join("combinedMetadata.csv"), b"x")?;

    let protected = vec![tmp.path().to_path_buf()];

    assert_eq!(
        remove_tree_protected(&doomed, &protected)?,
        DeleteOutcome::Removed
    );
    assert!(!doomed.exists());
    Ok(())
}

#[test]
fn missing_target_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let gone = tmp.path().join("never_existed");
    assert!(remove_tree_protected(&gone, &[]).is_err());
}
