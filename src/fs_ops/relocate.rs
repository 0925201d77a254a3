//! File relocation: move every listed file of a source directory into a
//! destination directory under the same name.
//!
//! Per-file policy:
//! - an existing destination entry is never replaced (`NameCollision`);
//! - a file gone between listing and move is `SourceVanished`;
//! - a rename refused with EXDEV falls back to copy, then remove of the source.
//!
//! Only the names that actually arrived at the destination are reported as
//! moved. Files are handled one at a time and cancellation is checked between
//! them.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::errors::{ErrorKind, FileFailure, MoveHideError, Result};
use crate::shutdown::CancelToken;
use crate::validate::DirectoryPath;
use crate::visibility::HideStrategy;

use super::atomic::{try_atomic_move, MoveOutcome};
use super::copy::copy_then_rename;
use super::helpers::{describe_io_error, is_cross_device};
use super::listing::{list_files, ListOptions};

#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOptions {
    /// Also move entries the hide strategy reports as hidden.
    pub include_hidden: bool,
    /// Report what would move without touching the filesystem.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    /// Names now present at the destination (or that would be, in a dry run).
    pub moved: Vec<String>,
    #[serde(serialize_with = "serialize_failures")]
    pub failed: Vec<FileFailure>,
    /// Cancelled before every listed file was attempted.
    pub interrupted: bool,
    pub dry_run: bool,
}

fn serialize_failures<S: serde::Serializer>(
    failed: &[FileFailure],
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    s.collect_seq(failed.iter().map(|f| f.to_string()))
}

impl MoveReport {
    pub fn failures_of(&self, kind: ErrorKind) -> impl Iterator<Item = &FileFailure> {
        self.failed.iter().filter(move |f| f.kind == kind)
    }
}

/// Move all files directly inside `source` into `destination`.
///
/// Both directories are re-validated. Directory-level problems (invalid path,
/// unreadable source, same directory) fail the call before any file is touched.
pub fn move_all(
    source: &DirectoryPath,
    destination: &DirectoryPath,
    strategy: &dyn HideStrategy,
    opts: MoveOptions,
    cancel: &CancelToken,
) -> Result<MoveReport> {
    let source = source.revalidate()?;
    let destination = destination.revalidate()?;
    if source == destination {
        return Err(MoveHideError::SameDirectory(source.into_path_buf()));
    }

    let listing = list_files(
        &source,
        strategy,
        ListOptions {
            include_hidden: opts.include_hidden,
        },
    )?;

    let mut report = MoveReport {
        dry_run: opts.dry_run,
        ..Default::default()
    };

    for entry in listing {
        if cancel.is_cancelled() {
            warn!(src = %source, moved = report.moved.len(), "move batch interrupted");
            report.interrupted = true;
            break;
        }

        let name = entry.name();
        let src = entry.path();
        let dst = destination.join(name);

        if fs::symlink_metadata(&dst).is_ok() {
            warn!(file = name, code = ErrorKind::NameCollision.code(), kind = %ErrorKind::NameCollision, "destination already has this name");
            report.failed.push(
                FileFailure::new(name, ErrorKind::NameCollision)
                    .with_detail(format!("'{}' exists", dst.display())),
            );
            continue;
        }

        if opts.dry_run {
            info!(src = %src.display(), dst = %dst.display(), "dry-run: would move file");
            report.moved.push(name.to_string());
            continue;
        }

        match move_one(&src, &dst) {
            Ok(outcome) => {
                info!(file = name, dst = %destination, ?outcome, "moved file");
                report.moved.push(name.to_string());
            }
            Err(f) => {
                warn!(file = name, code = f.kind.code(), kind = %f.kind, detail = ?f.detail, "move failed");
                report.failed.push(f);
            }
        }
    }

    debug!(
        moved = report.moved.len(),
        failed = report.failed.len(),
        interrupted = report.interrupted,
        "move batch finished"
    );
    Ok(report)
}

fn move_one(src: &Path, dst: &Path) -> std::result::Result<MoveOutcome, FileFailure> {
    let name = file_name_of(src);
    match try_atomic_move(src, dst) {
        Ok(outcome) => Ok(outcome),
        Err(e) if is_cross_device(&e) => {
            debug!(src = %src.display(), "rename crosses filesystems; copying");
            copy_across(src, dst).map_err(|e| classify(&name, src, dst, "copy", &e))?;
            Ok(MoveOutcome::Copied)
        }
        Err(e) => Err(classify(&name, src, dst, "rename", &e)),
    }
}

fn copy_across(src: &Path, dst: &Path) -> io::Result<()> {
    copy_then_rename(src, dst)?;
    if let Err(e) = fs::remove_file(src) {
        // Never leave the file in both places: drop the copy we just made.
        if let Err(undo) = fs::remove_file(dst) {
            warn!(dst = %dst.display(), error = %undo, "could not roll back copy");
        }
        return Err(io::Error::other(describe_io_error("remove original", src, &e)));
    }
    Ok(())
}

fn classify(name: &str, src: &Path, dst: &Path, op: &str, e: &io::Error) -> FileFailure {
    let kind = match e.kind() {
        io::ErrorKind::AlreadyExists => ErrorKind::NameCollision,
        io::ErrorKind::NotFound if fs::symlink_metadata(src).is_err() => ErrorKind::SourceVanished,
        _ => ErrorKind::Io,
    };
    let path = if kind == ErrorKind::NameCollision { dst } else { src };
    FileFailure::new(name, kind).with_detail(describe_io_error(op, path, e))
}

fn file_name_of(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
