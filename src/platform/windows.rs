//! Windows implementations of platform helpers (best-effort, minimal ACL awareness).
//!
//! Notes:
//! - Windows lacks POSIX mode semantics; we do not attempt ACL management here.
//! - Hidden files are marked with FILE_ATTRIBUTE_HIDDEN (+SYSTEM), not renamed.
//! - Moves go through MoveFileExW without MOVEFILE_REPLACE_EXISTING so an
//!   existing destination is never overwritten.

use anyhow::{bail, Result};
use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::os::windows::ffi::OsStrExt;
use std::os::windows::fs::MetadataExt;
use std::path::Path;

use windows_sys::Win32::Storage::FileSystem::{
    FILE_ATTRIBUTE_HIDDEN, FILE_ATTRIBUTE_NORMAL, FILE_ATTRIBUTE_SYSTEM, MoveFileExW,
    SetFileAttributesW,
};

use super::temp::tmp_config_sibling_name;

fn wide(s: &OsStr) -> Vec<u16> {
    s.encode_wide().chain(std::iter::once(0)).collect()
}

/// Open log file for appending (best-effort; no symlink defense available via std on Windows).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Write a new config file atomically (create_new) using a temp file + rename.
/// Fails if the target already exists. Best-effort security (no ACL changes).
pub fn write_config_secure_new_0600(path: &Path, contents: &[u8]) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists: {}", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = tmp_config_sibling_name(path);
    let mut f = OpenOptions::new().write(true).create_new(true).open(&tmp)?;
    f.write_all(contents)?;
    f.sync_all()?;
    drop(f);
    if let Err(e) = rename_noreplace(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// No-op on Windows; POSIX-style directory modes are not applicable.
pub fn set_dir_mode_0700(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// No-op on Windows; POSIX-style file modes are not applicable.
pub fn set_file_mode_0600(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Directory must be listable. FILE_ATTRIBUTE_READONLY is not consulted:
/// Windows ignores it on directories and Explorer sets it on customized
/// folders. Write denials surface per file from MoveFileExW.
pub fn check_dir_access(path: &Path) -> io::Result<()> {
    fs::read_dir(path)?;
    Ok(())
}

/// MoveFileExW with no flags: fails on an existing target and across volumes
/// (ERROR_NOT_SAME_DEVICE), both of which the caller handles.
pub fn rename_noreplace(src: &Path, dst: &Path) -> io::Result<()> {
    let from = wide(src.as_os_str());
    let to = wide(dst.as_os_str());
    let ok = unsafe { MoveFileExW(from.as_ptr(), to.as_ptr(), 0) };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

/// Read FILE_ATTRIBUTE_HIDDEN without following reparse points.
pub fn hidden_flag(path: &Path) -> io::Result<bool> {
    let attrs = fs::symlink_metadata(path)?.file_attributes();
    Ok(attrs & FILE_ATTRIBUTE_HIDDEN != 0)
}

/// Set or clear HIDDEN+SYSTEM, leaving every other attribute untouched.
pub fn set_hidden_flag(path: &Path, hidden: bool) -> io::Result<()> {
    let current = fs::symlink_metadata(path)?.file_attributes();
    let mask = FILE_ATTRIBUTE_HIDDEN | FILE_ATTRIBUTE_SYSTEM;
    let mut next = if hidden { current | mask } else { current & !mask };
    if next == 0 {
        next = FILE_ATTRIBUTE_NORMAL;
    }
    let w = wide(path.as_os_str());
    let ok = unsafe { SetFileAttributesW(w.as_ptr(), next) };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
