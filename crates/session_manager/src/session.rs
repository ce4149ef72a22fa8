//! Mutable state behind the session manager's lock

use chat_core::{MessageHistory, SessionState, TickerContext};

use crate::events::WidgetStatus;
use crate::manager::SkipReason;

#[derive(Debug, Default)]
pub(crate) struct WidgetSession {
    pub open: bool,
    pub ticker: Option<TickerContext>,
    pub state: SessionState,
    pub history: MessageHistory,
    pub suggestions: Vec<String>,
    pub show_suggestions: bool,
    pub awaiting_reply: bool,
    /// Bumped by open/close/clear so late replies from an old session are
    /// dropped instead of folded into the new one.
    pub epoch: u64,
}

impl WidgetSession {
    pub fn status(&self) -> WidgetStatus {
        if !self.open {
            WidgetStatus::Closed
        } else if self.state.locked() {
            WidgetStatus::Unavailable
        } else if self.awaiting_reply {
            WidgetStatus::AwaitingReply
        } else {
            WidgetStatus::Ready
        }
    }

    pub fn skip_reason(&self, text: &str) -> Option<SkipReason> {
        if text.trim().is_empty() {
            Some(SkipReason::Empty)
        } else if !self.open {
            Some(SkipReason::Closed)
        } else if self.state.locked() {
            Some(SkipReason::Locked)
        } else if self.awaiting_reply {
            Some(SkipReason::AwaitingReply)
        } else {
            None
        }
    }

    /// Start over: fresh session values and nothing in flight.
    pub fn restart(&mut self) {
        self.epoch += 1;
        self.awaiting_reply = false;
        self.state.reset();
    }

    pub fn suggestions_visible(&self) -> bool {
        self.show_suggestions
            && !self.suggestions.is_empty()
            && !self.awaiting_reply
            && !self.state.locked()
    }
}
