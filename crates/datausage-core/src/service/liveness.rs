//! Caller-liveness guard for completion callbacks.
//!
//! A `LivenessToken` lives with the party expecting a completion; the
//! `LivenessWatch` handed to an async operation answers whether that
//! party still exists when the result arrives. Dropping the token
//! silently retires every outstanding completion.

use std::sync::{Arc, Weak};

/// Owned by the party that wants completions delivered.
#[derive(Debug, Clone, Default)]
pub struct LivenessToken {
    inner: Arc<()>,
}

impl LivenessToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A watch that observes this token without keeping it alive.
    pub fn watch(&self) -> LivenessWatch {
        LivenessWatch {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

/// Weak observer side of a `LivenessToken`.
#[derive(Debug, Clone)]
pub struct LivenessWatch {
    inner: Weak<()>,
}

impl LivenessWatch {
    /// True while at least one clone of the token is alive.
    pub fn is_live(&self) -> bool {
        self.inner.strong_count() > 0
    }
}
