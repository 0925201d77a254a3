//! Hidden-file conventions.
//!
//! - `DotPrefix`: hidden means the entry is named `.name`; toggling renames.
//! - `HiddenAttribute`: hidden is a flag on the entry; the name never changes.
//!
//! Both are driven through `HideStrategy`, and `default_strategy()` picks the
//! host's convention once at startup.

use std::fmt;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::errors::{ErrorKind, FileFailure};
use crate::fs_ops::io_error_with_help;
use crate::platform;

/// What a single hide/show call did to the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Applied,
    /// Entry was already in the requested state; nothing touched.
    Unchanged,
}

/// Capability: mark an entry hidden or visible under one convention.
pub trait HideStrategy: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the entry `name` inside `dir` counts as hidden.
    fn is_hidden(&self, dir: &Path, name: &str) -> bool;

    /// Move `name` (its visible name) in `dir` into the requested state.
    fn set_hidden(&self, dir: &Path, name: &str, hidden: bool) -> Result<Change, FileFailure>;
}

/// Strategy for the host platform: attribute flag on Windows, dot prefix elsewhere.
pub fn default_strategy() -> Box<dyn HideStrategy> {
    if platform::uses_hidden_attribute() {
        Box::new(HiddenAttribute::native())
    } else {
        Box::new(DotPrefix)
    }
}

/// Entry existence without following symlinks; a dangling link still exists.
fn entry_exists(path: &Path) -> io::Result<bool> {
    match std::fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

fn io_failure(name: &str, op: &str, path: &Path, e: io::Error) -> FileFailure {
    let kind = match e.kind() {
        io::ErrorKind::NotFound => ErrorKind::FileNotFound,
        io::ErrorKind::AlreadyExists => ErrorKind::NameCollision,
        _ => ErrorKind::Io,
    };
    FileFailure::new(name, kind).with_detail(io_error_with_help(op, path)(e).to_string())
}

/// `name` <-> `.name` rename convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotPrefix;

impl DotPrefix {
    pub fn hidden_name(name: &str) -> String {
        format!(".{name}")
    }
}

impl HideStrategy for DotPrefix {
    fn name(&self) -> &'static str {
        "dot-prefix"
    }

    fn is_hidden(&self, _dir: &Path, name: &str) -> bool {
        name.starts_with('.')
    }

    fn set_hidden(&self, dir: &Path, name: &str, hidden: bool) -> Result<Change, FileFailure> {
        // A name that already starts with a dot has no visible form to return to.
        if name.starts_with('.') {
            let path = dir.join(name);
            let exists = entry_exists(&path).map_err(|e| io_failure(name, "stat", &path, e))?;
            return match (exists, hidden) {
                (false, _) => Err(FileFailure::new(name, ErrorKind::FileNotFound)),
                (true, true) => Ok(Change::Unchanged),
                (true, false) => Err(FileFailure::new(name, ErrorKind::InvalidName)
                    .with_detail("dot-prefixed name has no visible form")),
            };
        }

        let hidden_name = Self::hidden_name(name);
        let visible_path = dir.join(name);
        let hidden_path = dir.join(&hidden_name);
        let visible = entry_exists(&visible_path)
            .map_err(|e| io_failure(name, "stat", &visible_path, e))?;
        let concealed = entry_exists(&hidden_path)
            .map_err(|e| io_failure(name, "stat", &hidden_path, e))?;

        let (from, to) = match (hidden, visible, concealed) {
            (_, false, false) => return Err(FileFailure::new(name, ErrorKind::FileNotFound)),
            (true, false, true) | (false, true, false) => return Ok(Change::Unchanged),
            (_, true, true) => {
                let other = if hidden { &hidden_name } else { name };
                return Err(FileFailure::new(name, ErrorKind::NameCollision)
                    .with_detail(format!("'{other}' already exists")));
            }
            (true, true, false) => (&visible_path, &hidden_path),
            (false, false, true) => (&hidden_path, &visible_path),
        };

        platform::rename_noreplace(from, to).map_err(|e| io_failure(name, "rename", from, e))?;
        debug!(from = %from.display(), to = %to.display(), "renamed for visibility");
        Ok(Change::Applied)
    }
}

/// Reads and writes the hidden flag of a filesystem entry.
pub trait FlagStore: fmt::Debug + Send + Sync {
    fn get(&self, path: &Path) -> io::Result<bool>;
    fn set(&self, path: &Path, hidden: bool) -> io::Result<()>;
}

/// The OS attribute (FILE_ATTRIBUTE_HIDDEN on Windows).
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFlag;

impl FlagStore for NativeFlag {
    fn get(&self, path: &Path) -> io::Result<bool> {
        platform::hidden_flag(path)
    }

    fn set(&self, path: &Path, hidden: bool) -> io::Result<()> {
        platform::set_hidden_flag(path, hidden)
    }
}

/// Attribute-flag convention; the entry keeps its name.
#[derive(Debug, Clone, Default)]
pub struct HiddenAttribute<F: FlagStore = NativeFlag> {
    store: F,
}

impl HiddenAttribute<NativeFlag> {
    pub fn native() -> Self {
        Self { store: NativeFlag }
    }
}

impl<F: FlagStore> HiddenAttribute<F> {
    pub fn with_store(store: F) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &F {
        &self.store
    }
}

impl<F: FlagStore> HideStrategy for HiddenAttribute<F> {
    fn name(&self) -> &'static str {
        "hidden-attribute"
    }

    fn is_hidden(&self, dir: &Path, name: &str) -> bool {
        self.store.get(&dir.join(name)).unwrap_or(false)
    }

    fn set_hidden(&self, dir: &Path, name: &str, hidden: bool) -> Result<Change, FileFailure> {
        let path = dir.join(name);
        if !entry_exists(&path).map_err(|e| io_failure(name, "stat", &path, e))? {
            return Err(FileFailure::new(name, ErrorKind::FileNotFound));
        }
        let current = self
            .store
            .get(&path)
            .map_err(|e| io_failure(name, "read attributes", &path, e))?;
        if current == hidden {
            return Ok(Change::Unchanged);
        }
        self.store
            .set(&path, hidden)
            .map_err(|e| io_failure(name, "set attributes", &path, e))?;
        Ok(Change::Applied)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// In-memory flag store so the attribute convention can run on any host.
    #[derive(Debug, Default)]
    pub struct MemoryFlags(pub Mutex<HashSet<PathBuf>>);

    impl FlagStore for MemoryFlags {
        fn get(&self, path: &Path) -> io::Result<bool> {
            Ok(self.0.lock().unwrap().contains(path))
        }

        fn set(&self, path: &Path, hidden: bool) -> io::Result<()> {
            let mut flags = self.0.lock().unwrap();
            if hidden {
                flags.insert(path.to_path_buf());
            } else {
                flags.remove(path);
            }
            Ok(())
        }
    }
}
