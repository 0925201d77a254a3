//! Cross-filesystem fallback for a single file:
//! - Copies into a hidden temp sibling inside the destination directory
//! - Carries over permissions, timestamps (and xattrs with the `xattrs` feature)
//! - Renames the temp file into place without replacement, then fsyncs the directory
//!
//! The source is left alone here; the relocator removes it once the copy is in place.

use filetime::{set_file_times, FileTime};
use std::fs::{self, File, Metadata, OpenOptions};
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use crate::platform::{rename_noreplace, tmp_move_sibling_name};

use super::atomic::fsync_dir;

/// Copy `src` to `dst` (which must not exist) via a temp sibling.
pub fn copy_then_rename(src: &Path, dst: &Path) -> io::Result<()> {
    let dst_dir = dst
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "destination has no parent"))?;
    let lmeta = fs::symlink_metadata(src)?;
    let tmp = tmp_move_sibling_name(dst_dir);

    if lmeta.file_type().is_symlink() {
        copy_symlink(src, &tmp)?;
    } else {
        copy_contents(src, &tmp, &lmeta)?;
    }

    if let Err(e) = rename_noreplace(&tmp, dst) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    let _ = fsync_dir(dst_dir);
    debug!(src = %src.display(), dst = %dst.display(), "copied across filesystems");
    Ok(())
}

fn copy_contents(src: &Path, tmp: &Path, meta: &Metadata) -> io::Result<()> {
    let mut reader = File::open(src)?;
    let mut writer = OpenOptions::new().write(true).create_new(true).open(tmp)?;
    let copied: io::Result<()> = (|| {
        io::copy(&mut reader, &mut writer)?;
        writer.sync_all()
    })();
    drop(writer);
    if let Err(e) = copied {
        let _ = fs::remove_file(tmp);
        return Err(e);
    }

    preserve_times(tmp, meta);
    #[cfg(feature = "xattrs")]
    copy_xattrs(src, tmp);
    // Permissions last: a read-only mode would block the steps above on some platforms.
    if let Err(e) = fs::set_permissions(tmp, meta.permissions()) {
        warn!(path = %tmp.display(), error = %e, "could not carry over permissions");
    }
    Ok(())
}

fn preserve_times(dst: &Path, meta: &Metadata) {
    let atime = FileTime::from_last_access_time(meta);
    let mtime = FileTime::from_last_modification_time(meta);
    if let Err(e) = set_file_times(dst, atime, mtime) {
        warn!(path = %dst.display(), error = %e, "could not carry over timestamps");
    }
}

#[cfg(feature = "xattrs")]
fn copy_xattrs(src: &Path, dst: &Path) {
    let Ok(names) = xattr::list(src) else {
        return;
    };
    for name in names {
        if let Ok(Some(value)) = xattr::get(src, &name) {
            if let Err(e) = xattr::set(dst, &name, &value) {
                debug!(path = %dst.display(), attr = ?name, error = %e, "xattr not copied");
            }
        }
    }
}

#[cfg(unix)]
fn copy_symlink(src: &Path, tmp: &Path) -> io::Result<()> {
    let target = fs::read_link(src)?;
    std::os::unix::fs::symlink(target, tmp)
}

#[cfg(not(unix))]
fn copy_symlink(_src: &Path, _tmp: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links cannot be copied across volumes",
    ))
}
