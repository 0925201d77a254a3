//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the rest of the codebase can remain platform-agnostic.

#[cfg(unix)]
mod common_unix;
mod temp;
#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

pub use temp::{tmp_config_sibling_name, tmp_move_sibling_name};

#[cfg(unix)]
pub use unix::{
    check_dir_access, hidden_flag, open_log_file_secure_append, rename_noreplace,
    set_dir_mode_0700, set_file_mode_0600, set_hidden_flag, write_config_secure_new_0600,
};

#[cfg(not(unix))]
pub use windows::{
    check_dir_access, hidden_flag, open_log_file_secure_append, rename_noreplace,
    set_dir_mode_0700, set_file_mode_0600, set_hidden_flag, write_config_secure_new_0600,
};

/// True when the host marks hidden files with a filesystem attribute rather
/// than a leading dot.
#[inline]
pub const fn uses_hidden_attribute() -> bool {
    cfg!(windows)
}
