//! Session state owned by the session manager

use crate::lockout::LockoutMonitor;

/// Server-assigned conversation id. Zero or negative means "not established".
pub type SessionId = i64;

/// True when `id` names an established backend session.
pub fn is_established(id: Option<SessionId>) -> bool {
    matches!(id, Some(id) if id > 0)
}

/// Identity, running summary and lockout status of the current conversation.
///
/// `locked()` is always derived from the unrelated-topic count, so the
/// invariant `locked == (count >= 3)` cannot be broken by callers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    session_id: Option<SessionId>,
    summary: String,
    started: bool,
    lockout: LockoutMonitor,
}

impl SessionState {
    /// Fresh state: no session, empty summary, unlocked.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn unrelated_topic_count(&self) -> u32 {
        self.lockout.count()
    }

    pub fn locked(&self) -> bool {
        self.lockout.is_locked()
    }

    /// Fold a successful turn into the state. Returns true when this turn
    /// locked the session.
    ///
    /// An empty summary keeps the previous one; a missing or non-positive
    /// session id keeps the current id.
    pub fn apply_turn(
        &mut self,
        session_id: Option<SessionId>,
        summary: &str,
        unrelated_topic_count: u32,
    ) -> bool {
        if !summary.is_empty() {
            self.summary = summary.to_string();
        }
        if is_established(session_id) {
            self.session_id = session_id;
        }
        self.started = true;
        self.lockout.observe(unrelated_topic_count)
    }

    /// Return to fresh values.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
