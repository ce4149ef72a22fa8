//! Suggestion engine
//!
//! Deterministic quick-reply candidates used when the remote API supplies
//! none or cannot be reached.

use serde::{Deserialize, Serialize};

use crate::context::TickerContext;

/// Where the conversation is.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStage {
    Initial,
    FollowUp,
}

impl SuggestionStage {
    pub fn is_follow_up(&self) -> bool {
        matches!(self, Self::FollowUp)
    }
}

/// Derive the fallback suggestion set for a stage and optional ticker.
pub fn derive(stage: SuggestionStage, ticker: Option<&TickerContext>) -> Vec<String> {
    match (ticker, stage) {
        (Some(ticker), SuggestionStage::Initial) => {
            let symbol = &ticker.symbol;
            vec![
                format!("What's the outlook for {symbol}?"),
                format!("Tell me about {symbol}'s recent performance"),
                format!("What are analysts saying about {symbol}?"),
            ]
        }
        (Some(ticker), SuggestionStage::FollowUp) => {
            let symbol = &ticker.symbol;
            vec![
                format!("What's the long-term forecast for {symbol}?"),
                format!("How does {symbol} compare to competitors?"),
                format!("What are the key risks for {symbol}?"),
            ]
        }
        (None, SuggestionStage::Initial) => vec![
            "What's the market outlook today?".to_string(),
            "Tell me about popular stocks".to_string(),
            "What should I know about investing?".to_string(),
        ],
        (None, SuggestionStage::FollowUp) => vec![
            "Can you explain that in more detail?".to_string(),
            "What else should I know?".to_string(),
            "How does this apply to my situation?".to_string(),
        ],
    }
}
