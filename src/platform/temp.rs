//! Shared temporary name helpers for platform modules and the relocator.
//! Provides unique sibling filenames for atomic write and copy+rename.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn unique_suffix() -> String {
    let pid = std::process::id();
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{pid}.{nanos}.{seq}")
}

/// Pattern: .move_hide.config.tmp.<pid>.<nanos>.<seq>
pub fn tmp_config_sibling_name(target: &Path) -> PathBuf {
    let name = format!(".move_hide.config.tmp.{}", unique_suffix());
    target.parent().unwrap_or_else(|| Path::new(".")).join(name)
}

/// Temp file inside `dst_dir` used while copying across filesystems.
/// Pattern: .move_hide.<pid>.<nanos>.<seq>.tmp
pub fn tmp_move_sibling_name(dst_dir: &Path) -> PathBuf {
    dst_dir.join(format!(".move_hide.{}.tmp", unique_suffix()))
}
