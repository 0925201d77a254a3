//! Stateless entry points for a presentation layer: pick a directory, move
//! files, set visibility of a named file set.
//!
//! These use the host's hide strategy and a fresh cancel token (still tied
//! to the global Ctrl-C flag). Front ends that need the ledger and the
//! alternating toggle should drive a `Session` instead.

use std::path::PathBuf;
use tracing::warn;

use crate::errors::Result;
use crate::fs_ops::{move_all, MoveOptions};
use crate::shutdown::CancelToken;
use crate::validate::{validate, DirectoryPath};
use crate::visibility::{default_strategy, set_visibility};

/// External directory chooser (dialog, prompt, fixed answer in tests).
///
/// `None` means the user dismissed the chooser.
pub trait DirectoryPicker {
    fn pick(&self, purpose: &str) -> Option<PathBuf>;
}

impl<F> DirectoryPicker for F
where
    F: Fn(&str) -> Option<PathBuf>,
{
    fn pick(&self, purpose: &str) -> Option<PathBuf> {
        self(purpose)
    }
}

/// Ask `picker` for a directory and validate the answer.
pub fn pick_directory(picker: &dyn DirectoryPicker, purpose: &str) -> Result<Option<DirectoryPath>> {
    picker.pick(purpose).map(validate).transpose()
}

/// Move every file of `source` into `destination`; returns the moved names.
///
/// Per-file failures are logged and left out of the result.
pub fn move_files(source: &DirectoryPath, destination: &DirectoryPath) -> Result<Vec<String>> {
    let strategy = default_strategy();
    let report = move_all(
        source,
        destination,
        strategy.as_ref(),
        MoveOptions::default(),
        &CancelToken::new(),
    )?;
    for f in &report.failed {
        warn!(file = %f.name, code = f.kind.code(), kind = %f.kind, "not moved");
    }
    Ok(report.moved)
}

/// Hide or reveal `names` in `directory`. Fails only for an invalid directory.
pub fn set_files_visibility<S: AsRef<str>>(
    directory: &DirectoryPath,
    names: &[S],
    hidden: bool,
) -> Result<()> {
    let strategy = default_strategy();
    let report = set_visibility(directory, names, hidden, strategy.as_ref(), &CancelToken::new())?;
    if !report.failed.is_empty() {
        warn!(
            failed = report.failed.len(),
            succeeded = report.succeeded_count(),
            "visibility change incomplete"
        );
    }
    Ok(())
}
