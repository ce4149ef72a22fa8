//! Session events - what the host subscribes to

use chat_core::{Message, SessionState};
use chat_state::WidgetGeometry;
use serde::Serialize;

/// Coarse status surfaced to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetStatus {
    Closed,
    Ready,
    AwaitingReply,
    /// Locked by the unrelated-topic limit until a new session starts.
    Unavailable,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    HistoryChanged { messages: Vec<Message> },
    SessionChanged { state: SessionState },
    SuggestionsChanged { suggestions: Vec<String>, visible: bool },
    StatusChanged { status: WidgetStatus },
    GeometryChanged { geometry: WidgetGeometry },
}

impl SessionEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::HistoryChanged { .. } => "history_changed",
            Self::SessionChanged { .. } => "session_changed",
            Self::SuggestionsChanged { .. } => "suggestions_changed",
            Self::StatusChanged { .. } => "status_changed",
            Self::GeometryChanged { .. } => "geometry_changed",
        }
    }
}
