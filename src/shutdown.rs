//! Process-wide cancellation flag, set from the Ctrl-C handler.
//! The engine polls it between tasks so it never stops halfway through a file.
//!
//! Relaxed atomics are enough for a one-way "stop" flag, and `request()` is safe
//! to call from a signal handler.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::errors::MergeError;

static CANCELLED: AtomicBool = AtomicBool::new(false);

/// Ask running merges to stop at the next task boundary (idempotent).
#[inline]
pub fn request() {
    CANCELLED.store(true, Ordering::Relaxed);
}

#[inline]
pub fn is_requested() -> bool {
    CANCELLED.load(Ordering::Relaxed)
}

/// `Err(Interrupted)` once cancellation has been requested.
#[inline]
pub fn checkpoint() -> Result<(), MergeError> {
    if is_requested() {
        Err(MergeError::Interrupted)
    } else {
        Ok(())
    }
}
