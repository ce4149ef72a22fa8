use async_trait::async_trait;
use chat_core::{derive, SessionId, SuggestionStage, TickerContext};

use crate::error::Result;
use crate::models::{TurnReply, TurnRequest};

#[async_trait]
pub trait ChatApiClient: Send + Sync {
    /// Short adapter name for logs.
    fn name(&self) -> &'static str;

    /// Send one turn and normalize the reply.
    ///
    /// # Arguments
    /// * `turn` - message text plus the session's current id, summary and ticker
    async fn send_turn(&self, turn: &TurnRequest) -> Result<TurnReply>;

    /// Quick-reply candidates for the given stage.
    async fn fetch_suggestions(
        &self,
        stage: SuggestionStage,
        ticker: Option<&TickerContext>,
        _session_id: Option<SessionId>,
    ) -> Result<Vec<String>> {
        // Default implementation derives them locally
        Ok(derive(stage, ticker))
    }

    /// Probe the backend's health endpoint.
    async fn health(&self) -> Result<()>;
}
