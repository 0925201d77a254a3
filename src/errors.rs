//! Typed error definitions for move_hide.
//!
//! Two levels of failure exist:
//! - `MoveHideError`: directory-level; aborts the whole requested operation.
//! - `FileFailure`: file-level; isolated to one entry of a batch and reported
//!   next to the successes.
//!
//! Both map onto a flat `ErrorKind` so callers and logs can match on a stable
//! identifier without caring which level produced it.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Stable classification shared by directory- and file-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    NotADirectory,
    NotAccessible,
    DirectoryUnreadable,
    SameDirectory,
    NameCollision,
    SourceVanished,
    /// A filename handed to the toggler is absent from the directory.
    FileNotFound,
    /// Empty, `.`/`..`, or containing a path separator.
    InvalidName,
    /// Any other OS error while handling a single file.
    Io,
    NotSelected,
    Interrupted,
}

impl ErrorKind {
    /// Numeric code used as a structured log field and process exit hint.
    pub fn code(self) -> i32 {
        match self {
            ErrorKind::NotFound => 2,
            ErrorKind::NotADirectory => 3,
            ErrorKind::NotAccessible => 4,
            ErrorKind::DirectoryUnreadable => 5,
            ErrorKind::SameDirectory => 6,
            ErrorKind::NameCollision => 10,
            ErrorKind::SourceVanished => 11,
            ErrorKind::FileNotFound => 12,
            ErrorKind::InvalidName => 13,
            ErrorKind::Io => 14,
            ErrorKind::NotSelected => 20,
            ErrorKind::Interrupted => 130,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::NotADirectory => "not_a_directory",
            ErrorKind::NotAccessible => "not_accessible",
            ErrorKind::DirectoryUnreadable => "directory_unreadable",
            ErrorKind::SameDirectory => "same_directory",
            ErrorKind::NameCollision => "name_collision",
            ErrorKind::SourceVanished => "source_vanished",
            ErrorKind::FileNotFound => "file_not_found",
            ErrorKind::InvalidName => "invalid_name",
            ErrorKind::Io => "io",
            ErrorKind::NotSelected => "not_selected",
            ErrorKind::Interrupted => "interrupted",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directory-level failures. Any of these aborts the requested operation.
#[derive(Debug, Error)]
pub enum MoveHideError {
    #[error("Directory not found: '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("Not a directory: '{}'", .0.display())]
    NotADirectory(PathBuf),

    #[error("Directory not accessible '{}': {source}", .path.display())]
    NotAccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot list directory '{}': {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Source and destination resolve to the same directory: '{}'", .0.display())]
    SameDirectory(PathBuf),

    #[error("No {0} directory selected")]
    NotSelected(&'static str),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl MoveHideError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MoveHideError::NotFound(_) => ErrorKind::NotFound,
            MoveHideError::NotADirectory(_) => ErrorKind::NotADirectory,
            MoveHideError::NotAccessible { .. } => ErrorKind::NotAccessible,
            MoveHideError::DirectoryUnreadable { .. } => ErrorKind::DirectoryUnreadable,
            MoveHideError::SameDirectory(_) => ErrorKind::SameDirectory,
            MoveHideError::NotSelected(_) => ErrorKind::NotSelected,
            MoveHideError::Interrupted => ErrorKind::Interrupted,
        }
    }

    #[inline]
    pub fn code(&self) -> i32 {
        self.kind().code()
    }
}

/// A failure confined to one file inside a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub name: String,
    pub kind: ErrorKind,
    /// Human-readable context (OS error text with hints) when available.
    pub detail: Option<String>,
}

impl FileFailure {
    pub fn new(name: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            name: name.into(),
            kind,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.kind)?;
        if let Some(d) = &self.detail {
            write!(f, " ({d})")?;
        }
        Ok(())
    }
}

impl std::error::Error for FileFailure {}

pub type Result<T, E = MoveHideError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let all = [
            ErrorKind::NotFound,
            ErrorKind::NotADirectory,
            ErrorKind::NotAccessible,
            ErrorKind::DirectoryUnreadable,
            ErrorKind::SameDirectory,
            ErrorKind::NameCollision,
            ErrorKind::SourceVanished,
            ErrorKind::FileNotFound,
            ErrorKind::InvalidName,
            ErrorKind::Io,
            ErrorKind::NotSelected,
            ErrorKind::Interrupted,
        ];
        let codes: std::collections::HashSet<i32> = all.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn file_failure_display_includes_detail() {
        let f = FileFailure::new("a.txt", ErrorKind::NameCollision).with_detail("exists");
        assert_eq!(f.to_string(), "a.txt: name_collision (exists)");
        let bare = FileFailure::new("b.txt", ErrorKind::FileNotFound);
        assert_eq!(bare.to_string(), "b.txt: file_not_found");
    }

    #[test]
    fn directory_error_kind_mapping() {
        let e = MoveHideError::SameDirectory(PathBuf::from("/tmp/x"));
        assert_eq!(e.kind(), ErrorKind::SameDirectory);
        assert_eq!(e.code(), 6);
        assert!(e.to_string().contains("/tmp/x"));
    }
}
