// src/fsops/mod.rs

//! Filesystem primitives used by the stage and finalize phases.
//!
//! Everything here operates on real paths with `std::fs`; the phases own the
//! decision of what to copy or delete, this module owns how.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use globset::Glob;
use tracing::{debug, error, warn};

/// Highest `_N` suffix probed when a destination already exists.
pub const MAX_COLLISION_PROBES: u32 = 99;

/// Outcome of a guarded recursive delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The tree was removed.
    Removed,
    /// The target matched a protected root; nothing was touched.
    Refused,
}

/// Recursively copy a directory tree, returning the number of files copied.
///
/// The destination directory is created; existing files underneath it are
/// overwritten. Entries that are neither files nor directories (sockets,
/// broken symlinks) are skipped with a warning.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<u64> {
    fs::create_dir_all(dst).with_context(|| format!("creating directory {:?}", dst))?;

    let mut copied = 0u64;
    let entries =
        fs::read_dir(src).with_context(|| format!("reading directory {:?}", src))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {:?}", src))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry
            .file_type()
            .with_context(|| format!("reading file type of {:?}", from))?;

        if file_type.is_dir() {
            copied += copy_tree(&from, &to)?;
        } else if file_type.is_file() {
            fs::copy(&from, &to)
                .with_context(|| format!("copying {:?} to {:?}", from, to))?;
            copied += 1;
        } else {
            warn!("skipping non-regular entry {:?}", from);
        }
    }

    Ok(copied)
}

/// Resolve a destination path that may already be taken.
///
/// If `desired` does not exist it is returned unchanged. Otherwise suffixes
/// `_1` through `_99` are probed in order and the first free slot is chosen,
/// with a warning naming the collision. When every slot is taken the caller
/// must abort this run's operation; nothing is ever overwritten.
pub fn resolve_collision(desired: &Path) -> Result<PathBuf> {
    if !desired.exists() {
        return Ok(desired.to_path_buf());
    }

    let name = desired
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("destination {:?} has no leaf name", desired))?;

    for n in 1..=MAX_COLLISION_PROBES {
        let candidate = desired.with_file_name(format!("{name}_{n}"));
        if !candidate.exists() {
            warn!(
                "destination {:?} already exists, using suffix _{n} ({:?})",
                desired, candidate
            );
            return Ok(candidate);
        }
    }

    Err(anyhow!(
        "destination {:?} and all {} collision suffixes are taken",
        desired,
        MAX_COLLISION_PROBES
    ))
}

/// Delete every `*.fastq.gz` file under `dir`, returning how many were
/// removed. Raw sequencing input is never copied back to the NAS.
pub fn prune_fastq_gz(dir: &Path) -> Result<usize> {
    let matcher = Glob::new("*.fastq.gz")
        .context("compiling fastq.gz glob")?
        .compile_matcher();

    let mut removed = 0usize;
    let mut stack = vec![dir.to_path_buf()];

    while let Some(current) = stack.pop() {
        let entries =
            fs::read_dir(&current).with_context(|| format!("reading directory {:?}", current))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("reading entry in {:?}", current))?;
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if matcher.is_match(entry.file_name()) {
                fs::remove_file(&path)
                    .with_context(|| format!("removing fastq file {:?}", path))?;
                debug!("pruned {:?}", path);
                removed += 1;
            }
        }
    }

    Ok(removed)
}

/// Recursively delete a directory tree, refusing protected roots.
///
/// The guard runs before any mutation: if `target` resolves to the
/// filesystem root or to any path in `protected`, an error is logged, no
/// file is touched, and `Refused` is returned. A naming or path-join bug
/// elsewhere must never be able to produce a top-level deletion.
pub fn remove_tree_protected(target: &Path, protected: &[PathBuf]) -> Result<DeleteOutcome> {
    let resolved = target
        .canonicalize()
        .with_context(|| format!("resolving delete target {:?}", target))?;

    if is_protected(&resolved, protected) {
        error!(
            "refusing to delete protected path {:?} (resolved {:?})",
            target, resolved
        );
        return Ok(DeleteOutcome::Refused);
    }

    fs::remove_dir_all(&resolved)
        .with_context(|| format!("removing directory tree {:?}", resolved))?;
    debug!("removed directory tree {:?}", resolved);
    Ok(DeleteOutcome::Removed)
}

fn is_protected(resolved: &Path, protected: &[PathBuf]) -> bool {
    if resolved.parent().is_none() {
        // Filesystem root, always protected.
        return true;
    }
    protected.iter().any(|p| {
        // Compare against the canonical form when the protected root exists,
        // falling back to the raw spelling when it does not.
        match p.canonicalize() {
            Ok(canon) => resolved == canon,
            Err(_) => resolved == p,
        }
    })
}
