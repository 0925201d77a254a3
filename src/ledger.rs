//! In-memory record of the filenames moved during the current session.
//!
//! Append-only apart from a whole reset. Duplicates are kept in insertion
//! order; the toggler dedupes when it acts on a snapshot.

use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLedger {
    names: Vec<String>,
}

impl MoveLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append moved filenames. Recording nothing is fine.
    pub fn record<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.names.len();
        self.names.extend(names.into_iter().map(Into::into));
        debug!(added = self.names.len() - before, total = self.names.len(), "ledger updated");
    }

    /// Copy of the recorded names in order of recording.
    pub fn snapshot(&self) -> Vec<String> {
        self.names.clone()
    }

    pub fn reset(&mut self) {
        if !self.names.is_empty() {
            debug!(dropped = self.names.len(), "ledger reset");
        }
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
