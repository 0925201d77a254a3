//! Path validation.
//! Turns a user-supplied selection into a `DirectoryPath`: an absolute path to
//! an existing directory this process can list and write into.
//!
//! Notes:
//! - Validation is read-only: access is checked with the OS permission query,
//!   never by creating probe files in the user's directory.
//! - A `DirectoryPath` is not trusted across calls; operations re-validate it.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{ErrorKind, FileFailure, MoveHideError, Result};
use crate::platform::check_dir_access;

/// Absolute, validated path to a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectoryPath(PathBuf);

impl DirectoryPath {
    #[inline]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Run the validator again; the directory may have changed since selection.
    pub fn revalidate(&self) -> Result<DirectoryPath> {
        validate(&self.0)
    }

    /// Join a bare filename onto this directory.
    #[inline]
    pub fn join(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl AsRef<Path> for DirectoryPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Validate a selection. Empty input fails with `NotFound`.
pub fn validate(path: impl AsRef<Path>) -> Result<DirectoryPath> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(MoveHideError::NotFound(PathBuf::new()));
    }

    let meta = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => MoveHideError::NotFound(path.to_path_buf()),
        _ => MoveHideError::NotAccessible {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    if !meta.is_dir() {
        return Err(MoveHideError::NotADirectory(path.to_path_buf()));
    }

    check_dir_access(path).map_err(|e| MoveHideError::NotAccessible {
        path: path.to_path_buf(),
        source: e,
    })?;

    // dunce keeps Windows paths free of the \\?\ prefix.
    let real = dunce::canonicalize(path).map_err(|e| MoveHideError::NotAccessible {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!(path = %real.display(), "directory validated");
    Ok(DirectoryPath(real))
}

/// A bare filename: non-empty, not `.`/`..`, no separators or NUL.
pub fn validate_file_name(name: &str) -> std::result::Result<(), FileFailure> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('\0')
        || name.chars().any(std::path::is_separator)
        || Path::new(name).components().count() != 1;
    if bad {
        return Err(FileFailure::new(name, ErrorKind::InvalidName));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn empty_selection_is_not_found() {
        let err = validate("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn missing_directory_is_not_found() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = validate(temp.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn regular_file_is_not_a_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let f = temp.child("plain.txt");
        f.write_str("x").unwrap();
        let err = validate(f.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
    }

    #[test]
    fn valid_directory_is_absolute() {
        let temp = assert_fs::TempDir::new().unwrap();
        let dir = validate(temp.path()).unwrap();
        assert!(dir.as_path().is_absolute());
        assert_eq!(dir, dir.revalidate().unwrap());
    }

    #[test]
    fn relative_components_are_resolved() {
        let temp = assert_fs::TempDir::new().unwrap();
        let sub = temp.child("sub");
        sub.create_dir_all().unwrap();
        let direct = validate(sub.path()).unwrap();
        let dotted = validate(sub.path().join("..").join("sub")).unwrap();
        assert_eq!(direct, dotted);
    }

    #[test]
    fn file_names_are_checked() {
        assert!(validate_file_name("report.pdf").is_ok());
        assert!(validate_file_name(".hidden").is_ok());
        for bad in ["", ".", "..", "a/b", "/abs", "nul\0byte"] {
            let f = validate_file_name(bad).unwrap_err();
            assert_eq!(f.kind, ErrorKind::InvalidName, "{bad:?}");
        }
        #[cfg(windows)]
        assert!(validate_file_name("a\\b").is_err());
    }

    #[cfg(windows)]
    #[test]
    fn readonly_attribute_on_directory_is_accepted() {
        let temp = assert_fs::TempDir::new().unwrap();
        let sub = temp.child("Documents");
        sub.create_dir_all().unwrap();
        let mut perms = std::fs::metadata(sub.path()).unwrap().permissions();
        perms.set_readonly(true);
        std::fs::set_permissions(sub.path(), perms.clone()).unwrap();

        let result = validate(sub.path());

        perms.set_readonly(false);
        std::fs::set_permissions(sub.path(), perms).unwrap();
        assert!(result.is_ok(), "{result:?}");
    }

    #[test]
    fn revalidate_notices_removal() {
        let temp = assert_fs::TempDir::new().unwrap();
        let sub = temp.child("gone");
        sub.create_dir_all().unwrap();
        let dir = validate(sub.path()).unwrap();
        std::fs::remove_dir(sub.path()).unwrap();
        assert_eq!(dir.revalidate().unwrap_err().kind(), ErrorKind::NotFound);
    }
}
