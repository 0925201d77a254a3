//! Directory enumeration (non-recursive).
//!
//! Yields regular files and symlinks to regular files directly inside a
//! directory, sorted by name. Subdirectories, links to directories, dangling
//! links and special files (FIFOs, sockets, devices) are skipped, as are
//! entries the active hide strategy considers hidden unless asked for.
//!
//! Notes:
//! - Names that are not valid UTF-8 are skipped with a warning; they cannot be
//!   recorded in the move ledger.
//! - Per-entry read errors are logged and skipped; only failure to open the
//!   directory itself is an error.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::{MoveHideError, Result};
use crate::validate::DirectoryPath;
use crate::visibility::HideStrategy;

/// A file identified by its enclosing directory and bare name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileEntry {
    dir: PathBuf,
    name: String,
    symlink: bool,
}

impl FileEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// True when the entry is a symlink that resolves to a regular file.
    pub fn is_symlink(&self) -> bool {
        self.symlink
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    /// Also yield entries the hide strategy reports as hidden.
    pub include_hidden: bool,
}

/// Lazy, single-pass listing returned by `list_files`.
pub struct Listing<'a> {
    dir: PathBuf,
    inner: walkdir::IntoIter,
    strategy: &'a dyn HideStrategy,
    opts: ListOptions,
}

impl Iterator for Listing<'_> {
    type Item = FileEntry;

    fn next(&mut self) -> Option<FileEntry> {
        for item in self.inner.by_ref() {
            let entry = match item {
                Ok(e) => e,
                Err(e) => {
                    warn!(dir = %self.dir.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let ftype = entry.file_type();
            let symlink = ftype.is_symlink();
            let is_file = if symlink {
                // Follow once: links to files count, links to directories and dangling links do not.
                fs::metadata(entry.path()).map(|m| m.is_file()).unwrap_or(false)
            } else {
                ftype.is_file()
            };
            if !is_file {
                debug!(path = %entry.path().display(), "skipping non-file entry");
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };
            if !self.opts.include_hidden && self.strategy.is_hidden(&self.dir, name) {
                debug!(file = name, "skipping hidden entry");
                continue;
            }

            return Some(FileEntry {
                dir: self.dir.clone(),
                name: name.to_string(),
                symlink,
            });
        }
        None
    }
}

/// List files directly inside `dir`.
///
/// Fails with `DirectoryUnreadable` when the directory cannot be opened.
pub fn list_files<'a>(
    dir: &DirectoryPath,
    strategy: &'a dyn HideStrategy,
    opts: ListOptions,
) -> Result<Listing<'a>> {
    let path = dir.as_path();
    // walkdir reports a failing root lazily; surface it here instead.
    fs::read_dir(path).map_err(|e| MoveHideError::DirectoryUnreadable {
        path: path.to_path_buf(),
        source: e,
    })?;

    let inner = WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    Ok(Listing {
        dir: path.to_path_buf(),
        inner,
        strategy,
        opts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::validate::validate;
    use crate::visibility::DotPrefix;
    use assert_fs::prelude::*;

    fn names(listing: Listing<'_>) -> Vec<String> {
        listing.map(|e| e.name().to_string()).collect()
    }

    #[test]
    fn lists_only_top_level_files_sorted() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("b.txt").touch().unwrap();
        temp.child("a.txt").touch().unwrap();
        temp.child("sub").create_dir_all().unwrap();
        temp.child("sub/nested.txt").touch().unwrap();

        let dir = validate(temp.path()).unwrap();
        let listed = names(list_files(&dir, &DotPrefix, ListOptions::default()).unwrap());
        assert_eq!(listed, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn hidden_entries_need_opt_in() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".secret").touch().unwrap();
        temp.child("plain").touch().unwrap();
        let dir = validate(temp.path()).unwrap();

        let default = names(list_files(&dir, &DotPrefix, ListOptions::default()).unwrap());
        assert_eq!(default, vec!["plain"]);
        let all = names(
            list_files(&dir, &DotPrefix, ListOptions { include_hidden: true }).unwrap(),
        );
        assert_eq!(all, vec![".secret", "plain"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_to_files_only() {
        use std::os::unix::fs::symlink;
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("real.txt").touch().unwrap();
        temp.child("folder").create_dir_all().unwrap();
        symlink(temp.child("real.txt").path(), temp.child("file_link").path()).unwrap();
        symlink(temp.child("folder").path(), temp.child("dir_link").path()).unwrap();
        symlink(temp.child("missing").path(), temp.child("dangling").path()).unwrap();

        let dir = validate(temp.path()).unwrap();
        let entries: Vec<FileEntry> =
            list_files(&dir, &DotPrefix, ListOptions::default()).unwrap().collect();
        let listed: Vec<&str> = entries.iter().map(FileEntry::name).collect();
        assert_eq!(listed, vec!["file_link", "real.txt"]);
        assert!(entries[0].is_symlink());
        assert!(!entries[1].is_symlink());
        assert_eq!(entries[1].path(), dir.join("real.txt"));
    }

    #[test]
    fn removed_directory_is_unreadable() {
        let temp = assert_fs::TempDir::new().unwrap();
        let sub = temp.child("gone");
        sub.create_dir_all().unwrap();
        let dir = validate(sub.path()).unwrap();
        std::fs::remove_dir(sub.path()).unwrap();
        let err = list_files(&dir, &DotPrefix, ListOptions::default()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::DirectoryUnreadable);
    }
}
