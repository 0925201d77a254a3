//! Session controller.
//!
//! Owns the two directory selections, the move ledger and the batch-level
//! visibility state, and sequences the operations a front end drives:
//! select source, select destination, move, toggle.
//!
//! Notes:
//! - Selecting a source always starts a fresh ledger, even if the same
//!   directory is picked again.
//! - Toggling acts on the ledger contents inside the current destination and
//!   alternates hide/show based on the last successful batch.
//! - Calls are expected to be serialized by the caller (`&mut self`).

use std::path::Path;
use tracing::{error, info};

use crate::api::DirectoryPicker;
use crate::errors::{MoveHideError, Result};
use crate::fs_ops::{list_files, move_all, FileEntry, ListOptions, MoveOptions, MoveReport};
use crate::ledger::MoveLedger;
use crate::shutdown::CancelToken;
use crate::validate::{validate, DirectoryPath};
use crate::visibility::{default_strategy, set_visibility, HideStrategy, ToggleReport, VisibilityState};

/// Result of a toggle request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The ledger is empty: no files have been moved in this session.
    NothingToToggle,
    Applied(ToggleReport),
}

#[derive(Debug)]
pub struct Session {
    source: Option<DirectoryPath>,
    destination: Option<DirectoryPath>,
    ledger: MoveLedger,
    visibility: VisibilityState,
    strategy: Box<dyn HideStrategy>,
    options: MoveOptions,
    cancel: CancelToken,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(default_strategy())
    }
}

impl Session {
    pub fn new(strategy: Box<dyn HideStrategy>) -> Self {
        Self {
            source: None,
            destination: None,
            ledger: MoveLedger::new(),
            visibility: VisibilityState::default(),
            strategy,
            options: MoveOptions::default(),
            cancel: CancelToken::new(),
        }
    }

    pub fn with_options(mut self, options: MoveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source(&self) -> Option<&DirectoryPath> {
        self.source.as_ref()
    }

    pub fn destination(&self) -> Option<&DirectoryPath> {
        self.destination.as_ref()
    }

    pub fn ledger(&self) -> &MoveLedger {
        &self.ledger
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    pub fn strategy(&self) -> &dyn HideStrategy {
        self.strategy.as_ref()
    }

    pub fn options(&self) -> MoveOptions {
        self.options
    }

    /// Handle for cancelling the running batch from another thread.
    /// A cancel applies to one batch; the token is re-armed when that batch ends.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Validate and select the source directory; resets the ledger.
    pub fn select_source(&mut self, path: impl AsRef<Path>) -> Result<&DirectoryPath> {
        let dir = validate(path)?;
        self.ledger.reset();
        info!(source = %dir, "source directory selected");
        Ok(&*self.source.insert(dir))
    }

    pub fn select_destination(&mut self, path: impl AsRef<Path>) -> Result<&DirectoryPath> {
        let dir = validate(path)?;
        info!(destination = %dir, "destination directory selected");
        Ok(&*self.destination.insert(dir))
    }

    /// Ask `picker` for a source. `Ok(None)` when the user dismissed it.
    pub fn pick_source(&mut self, picker: &dyn DirectoryPicker) -> Result<Option<&DirectoryPath>> {
        match picker.pick("source") {
            Some(p) => self.select_source(p).map(Some),
            None => Ok(None),
        }
    }

    pub fn pick_destination(
        &mut self,
        picker: &dyn DirectoryPicker,
    ) -> Result<Option<&DirectoryPath>> {
        match picker.pick("destination") {
            Some(p) => self.select_destination(p).map(Some),
            None => Ok(None),
        }
    }

    /// Files currently listed in the selected source.
    pub fn list_source(&self) -> Result<Vec<FileEntry>> {
        let source = self.source.as_ref().ok_or(MoveHideError::NotSelected("source"))?;
        let source = source.revalidate()?;
        let opts = ListOptions {
            include_hidden: self.options.include_hidden,
        };
        Ok(list_files(&source, self.strategy.as_ref(), opts)?.collect())
    }

    /// Move everything from source to destination and record what arrived.
    pub fn move_files(&mut self) -> Result<MoveReport> {
        let source = self.source.as_ref().ok_or(MoveHideError::NotSelected("source"))?;
        let destination = self
            .destination
            .as_ref()
            .ok_or(MoveHideError::NotSelected("destination"))?;

        let result = move_all(
            source,
            destination,
            self.strategy.as_ref(),
            self.options,
            &self.cancel,
        );
        self.cancel.clear();
        let report = result
            .inspect_err(|e| error!(code = e.code(), kind = %e.kind(), error = %e, "move aborted"))?;

        if !report.dry_run {
            self.ledger.record(report.moved.iter().cloned());
        }
        info!(
            moved = report.moved.len(),
            failed = report.failed.len(),
            ledger = self.ledger.len(),
            "move finished"
        );
        Ok(report)
    }

    /// Hide the ledger files if they are shown, show them if hidden.
    pub fn toggle_visibility(&mut self) -> Result<ToggleOutcome> {
        let destination = self
            .destination
            .as_ref()
            .ok_or(MoveHideError::NotSelected("destination"))?;
        if self.ledger.is_empty() {
            info!("no files have been moved yet");
            return Ok(ToggleOutcome::NothingToToggle);
        }

        let hidden = self.visibility.next_hidden();
        let names = self.ledger.snapshot();
        let result =
            set_visibility(destination, &names, hidden, self.strategy.as_ref(), &self.cancel);
        self.cancel.clear();
        let report = result
            .inspect_err(|e| error!(code = e.code(), kind = %e.kind(), error = %e, "toggle aborted"))?;

        let before = self.visibility;
        self.visibility = before.after(&report);
        info!(
            from = ?before,
            to = ?self.visibility,
            succeeded = report.succeeded_count(),
            failed = report.failed.len(),
            "visibility toggled"
        );
        Ok(ToggleOutcome::Applied(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::visibility::DotPrefix;
    use assert_fs::prelude::*;
    use std::path::PathBuf;

    fn session_with_dirs() -> (assert_fs::TempDir, Session) {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src").create_dir_all().unwrap();
        temp.child("dst").create_dir_all().unwrap();
        let mut s = Session::new(Box::new(DotPrefix));
        s.select_source(temp.child("src").path()).unwrap();
        s.select_destination(temp.child("dst").path()).unwrap();
        (temp, s)
    }

    #[test]
    fn move_requires_both_selections() {
        let mut s = Session::new(Box::new(DotPrefix));
        let err = s.move_files().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotSelected);
        assert_eq!(err.to_string(), "No source directory selected");

        let temp = assert_fs::TempDir::new().unwrap();
        s.select_source(temp.path()).unwrap();
        assert_eq!(s.move_files().unwrap_err().to_string(), "No destination directory selected");
    }

    #[test]
    fn toggle_alternates_and_records() {
        let (temp, mut s) = session_with_dirs();
        temp.child("src/one").touch().unwrap();
        temp.child("src/two").touch().unwrap();
        let report = s.move_files().unwrap();
        assert_eq!(report.moved.len(), 2);
        assert_eq!(s.ledger().snapshot(), vec!["one", "two"]);

        let ToggleOutcome::Applied(hide) = s.toggle_visibility().unwrap() else {
            panic!("expected a toggle");
        };
        assert!(hide.hidden);
        assert_eq!(s.visibility(), VisibilityState::Hidden);
        assert!(temp.child("dst/.one").path().exists());

        let ToggleOutcome::Applied(show) = s.toggle_visibility().unwrap() else {
            panic!("expected a toggle");
        };
        assert!(!show.hidden);
        assert_eq!(s.visibility(), VisibilityState::Shown);
        assert!(temp.child("dst/one").path().exists());
    }

    #[test]
    fn new_source_resets_ledger() {
        let (temp, mut s) = session_with_dirs();
        temp.child("src/f").touch().unwrap();
        s.move_files().unwrap();
        assert_eq!(s.ledger().len(), 1);

        s.select_source(temp.child("src").path()).unwrap();
        assert!(s.ledger().is_empty());
        assert_eq!(s.toggle_visibility().unwrap(), ToggleOutcome::NothingToToggle);
    }

    #[test]
    fn failed_selection_keeps_previous_state() {
        let (temp, mut s) = session_with_dirs();
        temp.child("src/f").touch().unwrap();
        s.move_files().unwrap();
        let err = s.select_source(temp.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(s.ledger().len(), 1);
    }

    #[test]
    fn dry_run_is_not_recorded() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/f").touch().unwrap();
        temp.child("dst").create_dir_all().unwrap();
        let mut s = Session::new(Box::new(DotPrefix)).with_options(MoveOptions {
            dry_run: true,
            ..Default::default()
        });
        s.select_source(temp.child("src").path()).unwrap();
        s.select_destination(temp.child("dst").path()).unwrap();
        let report = s.move_files().unwrap();
        assert_eq!(report.moved, vec!["f"]);
        assert!(s.ledger().is_empty());
    }

    #[test]
    fn cancel_stops_one_batch_only() {
        let (temp, mut s) = session_with_dirs();
        temp.child("src/a").touch().unwrap();
        temp.child("src/b").touch().unwrap();

        s.cancel_token().cancel();
        let first = s.move_files().unwrap();
        assert!(first.interrupted);
        assert!(first.moved.is_empty());

        let second = s.move_files().unwrap();
        assert!(!second.interrupted);
        assert_eq!(second.moved, vec!["a", "b"]);

        s.cancel_token().cancel();
        let ToggleOutcome::Applied(stopped) = s.toggle_visibility().unwrap() else {
            panic!("expected a toggle");
        };
        assert!(stopped.interrupted);
        assert_eq!(s.visibility(), VisibilityState::Shown);
        let ToggleOutcome::Applied(hide) = s.toggle_visibility().unwrap() else {
            panic!("expected a toggle");
        };
        assert_eq!(hide.applied, vec!["a", "b"]);
        assert_eq!(s.visibility(), VisibilityState::Hidden);
    }

    #[test]
    fn picker_dismissal_is_not_an_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let path = temp.path().to_path_buf();
        let mut s = Session::new(Box::new(DotPrefix));
        let none = |_: &str| -> Option<PathBuf> { None };
        assert!(s.pick_source(&none).unwrap().is_none());
        let some = move |_: &str| Some(path.clone());
        assert!(s.pick_destination(&some).unwrap().is_some());
        assert!(s.destination().is_some());
    }
}
