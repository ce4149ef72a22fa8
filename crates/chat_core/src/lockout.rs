//! Lockout monitor
//!
//! Tracks the server-reported unrelated-topic count. The count is only ever
//! set from the remote value, never incremented locally.

use serde::{Deserialize, Serialize};

/// Number of unrelated turns after which the session locks.
pub const UNRELATED_TOPIC_THRESHOLD: u32 = 3;

/// Derives the locked/unlocked status from the unrelated-topic count.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LockoutMonitor {
    unrelated_topic_count: u32,
}

impl LockoutMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure lock predicate.
    pub fn is_locked_at(count: u32) -> bool {
        count >= UNRELATED_TOPIC_THRESHOLD
    }

    /// Record the authoritative count from a turn. Returns true if this
    /// observation moved the session from unlocked to locked.
    pub fn observe(&mut self, count: u32) -> bool {
        let was_locked = self.is_locked();
        self.unrelated_topic_count = count;
        !was_locked && self.is_locked()
    }

    pub fn count(&self) -> u32 {
        self.unrelated_topic_count
    }

    pub fn is_locked(&self) -> bool {
        Self::is_locked_at(self.unrelated_topic_count)
    }
}
