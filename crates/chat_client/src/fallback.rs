//! Failure mapping
//!
//! Converts any client failure into the reply and suggestions shown in
//! place of a real answer. Nothing here touches session or lockout state.

use crate::error::ChatClientError;

pub const FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble connecting to the API right now. Please try again in a moment.";

const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "Try asking again",
    "Check your connection",
    "Contact support if the issue persists",
];

/// Reply and suggestions substituted for a failed turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnFallback {
    pub reply: String,
    pub suggestions: Vec<String>,
}

impl TurnFallback {
    pub fn generic() -> Self {
        Self {
            reply: FALLBACK_REPLY.to_string(),
            suggestions: FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn map_failure(error: &ChatClientError) -> TurnFallback {
    match error {
        ChatClientError::Api {
            message: Some(message),
            suggestions,
            ..
        } => {
            let mut fallback = TurnFallback::generic();
            fallback.reply = format!("API Error: {}", message);
            if !suggestions.is_empty() {
                fallback.suggestions = suggestions.clone();
            }
            fallback
        }
        _ => TurnFallback::generic(),
    }
}
