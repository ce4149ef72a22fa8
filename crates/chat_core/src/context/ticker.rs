//! TickerContext - optional stock binding supplied by the host page

use serde::{Deserialize, Serialize};

const GENERIC_OPEN_GREETING: &str = "Hello! I'm your AI assistant. I can help you with tasks, stock information, and answer questions. How can I assist you today?";
const GENERIC_CLEAR_GREETING: &str = "Hello! I'm your AI assistant. How can I assist you today?";

/// Stock the conversation is about. Read-only to the widget.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TickerContext {
    pub symbol: String,
    pub name: String,
    pub price: f64,
}

impl TickerContext {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price,
        }
    }

    /// Welcome text naming the ticker and its current price.
    pub fn welcome(&self) -> String {
        format!(
            "Hello! I can help you with information about {} ({}). Current price is ${}. What would you like to know?",
            self.symbol, self.name, self.price
        )
    }
}

/// Welcome seeded when the widget opens.
pub fn open_greeting(ticker: Option<&TickerContext>) -> String {
    match ticker {
        Some(ticker) => ticker.welcome(),
        None => GENERIC_OPEN_GREETING.to_string(),
    }
}

/// Welcome seeded when the user clears the chat.
pub fn clear_greeting(ticker: Option<&TickerContext>) -> String {
    match ticker {
        Some(ticker) => ticker.welcome(),
        None => GENERIC_CLEAR_GREETING.to_string(),
    }
}
