//! Process-wide shutdown coordination and per-session cancellation.
//!
//! Notes:
//! - The global flag is set by the ctrlc handler; `request()` is safe to call
//!   from signal handlers.
//! - A `CancelToken` observes both its own flag and the global one, so a batch
//!   checks a single place once per file.
//! - Relaxed atomics are sufficient for a one-way "stop" flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Clear the shutdown flag. The interactive shell calls this after an
/// interrupted batch so the next command can run.
#[inline]
pub fn reset() {
    SHUTDOWN.store(false, Ordering::Relaxed);
}

/// Cloneable cancellation handle checked between individual file operations.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Re-arm the token for the next batch.
    pub fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed) || is_requested()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_clones_share_state() {
        let a = CancelToken::new();
        let b = a.clone();
        assert!(!b.is_cancelled() || is_requested());
        a.cancel();
        assert!(b.is_cancelled());
        b.clear();
        assert!(!a.0.load(Ordering::Relaxed));
    }
}
