//! Filesystem operations: listing, relocation and the rename/copy primitives
//! underneath them.

mod atomic;
mod copy;
mod helpers;
mod listing;
mod relocate;

pub use atomic::{try_atomic_move, MoveOutcome};
pub use copy::copy_then_rename;
pub use helpers::{describe_io_error, io_error_with_help};
pub use listing::{list_files, FileEntry, ListOptions, Listing};
pub use relocate::{move_all, MoveOptions, MoveReport};
