//! Presentation snapshot of the widget

use chat_core::Message;
use serde::Serialize;

use crate::events::WidgetStatus;
use crate::session::WidgetSession;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionPanel {
    pub header: String,
    pub items: Vec<String>,
}

/// Everything a renderer needs, derived from session state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetView {
    pub status: WidgetStatus,
    pub title: String,
    pub subtitle: Option<String>,
    pub placeholder: String,
    pub input_enabled: bool,
    pub typing_indicator: bool,
    pub suggestions: Option<SuggestionPanel>,
    pub messages: Vec<Message>,
}

impl WidgetView {
    pub(crate) fn from_session(session: &WidgetSession) -> Self {
        let locked = session.state.locked();
        let symbol = session.ticker.as_ref().map(|t| t.symbol.as_str());

        let title = if locked {
            "Chat currently unavailable"
        } else {
            "AI Assistant"
        };

        let placeholder = match (locked, symbol) {
            (true, _) => "Chat unavailable - close and reopen to start new session".to_string(),
            (false, Some(symbol)) => format!("Ask about {}...", symbol),
            (false, None) => "Type your message...".to_string(),
        };

        let suggestions = session.suggestions_visible().then(|| SuggestionPanel {
            header: if session.history.len() == 1 {
                "Quick suggestions:".to_string()
            } else {
                "Continue the conversation:".to_string()
            },
            items: session.suggestions.clone(),
        });

        Self {
            status: session.status(),
            title: title.to_string(),
            subtitle: symbol
                .filter(|_| !locked)
                .map(|s| format!("Discussing {}", s)),
            placeholder,
            input_enabled: session.open && !locked && !session.awaiting_reply,
            typing_indicator: session.awaiting_reply,
            suggestions,
            messages: session.history.messages().to_vec(),
        }
    }
}
