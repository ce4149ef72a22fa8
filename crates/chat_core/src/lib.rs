//! chat_core - Core types for the stock chat widget
//!
//! This crate provides the foundational types shared by the client,
//! state machine and session crates:
//! - `message` - Message, MessageHistory (append-only)
//! - `context` - TickerContext and welcome texts
//! - `session` - SessionState owned by the session manager
//! - `lockout` - unrelated-topic lockout monitor
//! - `suggestions` - deterministic quick-reply derivation
//! - `config` - WidgetConfig loading

pub mod config;
pub mod context;
pub mod lockout;
pub mod message;
pub mod session;
pub mod suggestions;

// Re-export commonly used types
pub use config::{BackendKind, ConfigError, WidgetConfig};
pub use context::{clear_greeting, open_greeting, TickerContext};
pub use lockout::{LockoutMonitor, UNRELATED_TOPIC_THRESHOLD};
pub use message::{Message, MessageHistory, MessageId, MessageStatus, Sender};
pub use session::{is_established, SessionId, SessionState};
pub use suggestions::{derive, SuggestionStage};
