//! Batch visibility toggling over a named set of files.

use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};

use crate::errors::{ErrorKind, FileFailure, Result};
use crate::shutdown::CancelToken;
use crate::validate::{DirectoryPath, validate_file_name};

use super::strategy::{Change, HideStrategy};

/// Visibility of the whole moved set; there is no per-file state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityState {
    #[default]
    Shown,
    Hidden,
}

impl VisibilityState {
    /// The `hidden` argument the next toggle should use.
    #[inline]
    pub fn next_hidden(self) -> bool {
        matches!(self, VisibilityState::Shown)
    }

    /// State after a batch. Empty, all-failed and interrupted batches keep
    /// the current state.
    pub fn after(self, report: &ToggleReport) -> Self {
        if report.interrupted || report.succeeded_count() == 0 {
            return self;
        }
        if report.hidden {
            VisibilityState::Hidden
        } else {
            VisibilityState::Shown
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToggleReport {
    /// Requested state for this batch.
    pub hidden: bool,
    /// Entries whose on-disk state changed.
    pub applied: Vec<String>,
    /// Entries already in the requested state.
    pub unchanged: Vec<String>,
    #[serde(serialize_with = "serialize_failures")]
    pub failed: Vec<FileFailure>,
    /// Cancelled before every name was attempted.
    pub interrupted: bool,
}

fn serialize_failures<S: serde::Serializer>(
    failed: &[FileFailure],
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    s.collect_seq(failed.iter().map(|f| f.to_string()))
}

impl ToggleReport {
    pub fn succeeded_count(&self) -> usize {
        self.applied.len() + self.unchanged.len()
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &str> {
        self.applied.iter().chain(self.unchanged.iter()).map(String::as_str)
    }

    /// At least one name was attempted and none succeeded.
    pub fn all_failed(&self) -> bool {
        !self.failed.is_empty() && self.succeeded_count() == 0
    }
}

/// Hide or reveal each of `names` inside `dir`.
///
/// `dir` is re-validated first; that is the only failure for the whole call.
/// Every other problem is recorded per name and the batch continues.
/// Duplicate names are attempted once.
pub fn set_visibility<S: AsRef<str>>(
    dir: &DirectoryPath,
    names: &[S],
    hidden: bool,
    strategy: &dyn HideStrategy,
    cancel: &CancelToken,
) -> Result<ToggleReport> {
    let dir = dir.revalidate()?;
    let mut report = ToggleReport {
        hidden,
        ..Default::default()
    };
    let mut seen = HashSet::new();

    for name in names.iter().map(AsRef::as_ref) {
        if !seen.insert(name) {
            continue;
        }
        if cancel.is_cancelled() {
            warn!(dir = %dir, "visibility batch interrupted");
            report.interrupted = true;
            break;
        }
        if let Err(f) = validate_file_name(name) {
            warn!(file = name, code = f.kind.code(), kind = %f.kind, "skipping invalid name");
            report.failed.push(f);
            continue;
        }
        match strategy.set_hidden(dir.as_path(), name, hidden) {
            Ok(Change::Applied) => {
                info!(file = name, hidden, strategy = strategy.name(), "visibility changed");
                report.applied.push(name.to_string());
            }
            Ok(Change::Unchanged) => report.unchanged.push(name.to_string()),
            Err(f) => {
                warn!(file = name, code = f.kind.code(), kind = %f.kind, detail = ?f.detail, "visibility change failed");
                report.failed.push(f);
            }
        }
    }

    if report.failed.iter().any(|f| f.kind == ErrorKind::FileNotFound) {
        info!(dir = %dir, "some names were absent from the directory");
    }
    Ok(report)
}
