//! Core library for `move_hide`.
//!
//! Moves the files of one directory into another and then hides or reveals
//! exactly the moved set, using the host's hidden-file convention.
//!
//! Layout:
//! - `validate`: directory selection checks (`DirectoryPath`).
//! - `fs_ops`: listing, relocation and the rename/copy primitives.
//! - `visibility`: hide strategies and batch toggling.
//! - `ledger` / `session`: what was moved, and the select/move/toggle flow.
//! - `api`: stateless entry points for a presentation layer.
//! - `config`, `cli`, `output`, `platform`, `shutdown`: the binary's support code.

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod ledger;
pub mod output;
pub mod platform;
pub mod session;
pub mod shutdown;
pub mod validate;
pub mod visibility;

pub use api::{move_files, pick_directory, set_files_visibility, DirectoryPicker};
pub use config::{
    create_template_config, default_config_path, default_log_path, load_config,
    load_config_from_xml_path, path_has_symlink_ancestor, Config, LogLevel, CONFIG_ENV,
};
pub use errors::{ErrorKind, FileFailure, MoveHideError};
pub use fs_ops::{list_files, move_all, FileEntry, ListOptions, Listing, MoveOptions, MoveReport};
pub use ledger::MoveLedger;
pub use session::{Session, ToggleOutcome};
pub use shutdown::CancelToken;
pub use validate::{validate, validate_file_name, DirectoryPath};
pub use visibility::{
    default_strategy, set_visibility, DotPrefix, HiddenAttribute, HideStrategy, ToggleReport,
    VisibilityState,
};

/// Convenience imports for front ends.
pub mod prelude {
    pub use crate::api::{move_files, pick_directory, set_files_visibility, DirectoryPicker};
    pub use crate::errors::{ErrorKind, FileFailure, MoveHideError};
    pub use crate::session::{Session, ToggleOutcome};
    pub use crate::validate::{validate, DirectoryPath};
    pub use crate::visibility::{HideStrategy, VisibilityState};
}
