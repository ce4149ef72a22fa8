//! chat_client - Chat API client for the stock chat widget
//!
//! Translates session turns into backend requests and backend payloads
//! into normalized replies. Two interchangeable adapters are provided:
//! the hosted StockChat API and the local demo backend.

pub mod client_factory;
pub mod client_trait;
pub mod error;
pub mod fallback;
pub mod models;
pub mod providers;

pub use client_factory::{create_client, AVAILABLE_BACKENDS};
pub use client_trait::ChatApiClient;
pub use error::{ChatClientError, Result};
pub use fallback::{map_failure, TurnFallback, FALLBACK_REPLY};
pub use models::{format_turn, parse_response, ChatTurnPayload, ChatTurnResponse, TurnReply, TurnRequest};
pub use providers::{ExternalChatClient, LocalBackendClient};
