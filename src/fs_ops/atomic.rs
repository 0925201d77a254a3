//! Atomic rename helper.
//! - Never replaces an existing destination (platform no-replace rename).
//! - On Unix, best-effort fsync of the destination directory after rename.

#[cfg(unix)]
use std::fs::File;
use std::io;
use std::path::Path;

use crate::platform::rename_noreplace;

/// How a file reached its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Renamed,
    /// Copied across filesystems, then the source was removed.
    Copied,
}

/// Rename `src` to `dst` in one step. Errors come back untouched so callers
/// can classify them (AlreadyExists, NotFound, cross-device).
pub fn try_atomic_move(src: &Path, dst: &Path) -> io::Result<MoveOutcome> {
    rename_noreplace(src, dst)?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // Ignore fsync errors to avoid turning a successful rename into a failure.
        let _ = fsync_dir(parent);
    }

    Ok(MoveOutcome::Renamed)
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
pub(super) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn rename_across_dirs_same_fs() {
        let td = tempdir().unwrap();
        let a = td.path().join("a");
        let b = td.path().join("b");
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        let src = a.join("file.txt");
        fs::write(&src, "hello").unwrap();

        let dst = b.join("file.txt");
        assert_eq!(try_atomic_move(&src, &dst).unwrap(), MoveOutcome::Renamed);
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "hello");
    }

    #[test]
    fn existing_destination_is_not_overwritten() {
        let td = tempdir().unwrap();
        let src = td.path().join("new.txt");
        let dst = td.path().join("old.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old").unwrap();
        let err = try_atomic_move(&src, &dst).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "old");
        assert_eq!(fs::read_to_string(&src).unwrap(), "new");
    }
}
