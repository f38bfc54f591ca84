//! Stale-response guard for the search flow.
//!
//! A new search supersedes an in-flight one; without coordination an old
//! response arriving late would overwrite newer results. Each search takes
//! a token from a monotonically increasing sequence, and a completed
//! response is applied only while its token is still the latest issued.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchToken(u64);

#[derive(Debug, Default)]
pub struct SearchSequence {
    counter: AtomicU64,
}

impl SearchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the token for a new search, superseding all earlier ones.
    pub fn begin(&self) -> SearchToken {
        SearchToken(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a response carrying this token may still be applied.
    pub fn is_current(&self, token: SearchToken) -> bool {
        self.counter.load(Ordering::SeqCst) == token.0
    }
}
