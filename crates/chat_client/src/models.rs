//! Wire models for the hosted chat API and the normalized turn types
//! shared by all adapters.

use chat_core::{is_established, SessionId, TickerContext};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ChatClientError, Result};

/// One turn as the session manager describes it, independent of backend.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnRequest {
    pub text: String,
    pub user_id: String,
    pub ticker: Option<TickerContext>,
    pub summary: String,
    pub session_id: Option<SessionId>,
}

/// Request body of `POST /api/StockChatApi/chat`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatTurnPayload {
    pub user_id: String,
    pub message: String,
    pub ticker: String,
    pub summary: String,
    /// Omitted to ask the server for a new session.
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
}

/// Build the request body. The session id is included only when it names
/// an established session.
pub fn format_turn(
    text: &str,
    user_id: &str,
    ticker: Option<&TickerContext>,
    summary: Option<&str>,
    session_id: Option<SessionId>,
) -> ChatTurnPayload {
    ChatTurnPayload {
        user_id: user_id.to_string(),
        message: text.to_string(),
        ticker: ticker.map(|t| t.symbol.clone()).unwrap_or_default(),
        summary: summary.unwrap_or_default().to_string(),
        session_id: session_id.filter(|&id| is_established(Some(id))),
    }
}

impl From<&TurnRequest> for ChatTurnPayload {
    fn from(turn: &TurnRequest) -> Self {
        format_turn(
            &turn.text,
            &turn.user_id,
            turn.ticker.as_ref(),
            Some(&turn.summary),
            turn.session_id,
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body of the hosted chat API. Every field is optional on the
/// wire; absence is never an error by itself.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatTurnResponse {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, rename = "suggestedPrompts")]
    pub suggested_prompts: Option<Vec<String>>,
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<SessionId>,
    #[serde(
        default,
        rename = "unrelatedTopicCount",
        deserialize_with = "lenient_count"
    )]
    pub unrelated_topic_count: Option<u32>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// Accept any numeric count. Negative values read as 0, fractions are
/// truncated, and non-numeric values are treated as absent.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|n| n.is_finite())
        .map(|n| n.max(0.0) as u32))
}

/// Normalized successful turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnReply {
    pub reply: String,
    pub summary: String,
    pub suggestions: Vec<String>,
    pub session_id: Option<SessionId>,
    pub unrelated_topic_count: u32,
}

/// Normalize a decoded payload. A present `error` object fails the turn
/// even when the HTTP status was 200.
pub fn parse_response(payload: ChatTurnResponse) -> Result<TurnReply> {
    if let Some(error) = payload.error {
        return Err(ChatClientError::Api {
            message: error.message,
            summary: payload.summary,
            suggestions: payload.suggested_prompts.unwrap_or_default(),
        });
    }

    Ok(TurnReply {
        reply: payload.reply.unwrap_or_default(),
        summary: payload.summary.unwrap_or_default(),
        suggestions: payload.suggested_prompts.unwrap_or_default(),
        session_id: payload.session_id,
        unrelated_topic_count: payload.unrelated_topic_count.unwrap_or(0),
    })
}
