//! Adapter for the demo backend that ships next to the dashboard.
//!
//! The demo backend identifies conversations by opaque tokens (usually
//! UUID strings). The widget only deals in integer session ids, so this
//! adapter hands out integer handles and maps them back on every call.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chat_core::{SessionId, SuggestionStage, TickerContext, WidgetConfig};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client_trait::ChatApiClient;
use crate::error::{ChatClientError, Result};
use crate::models::{TurnReply, TurnRequest};

use super::common::{join_url, log_api_call, post_json, probe_health};

pub const CHAT_ENDPOINT: &str = "/api/chatbot/message";
pub const SUGGESTIONS_ENDPOINT: &str = "/api/chatbot/suggestions";
pub const HEALTH_ENDPOINT: &str = "/api/health";

/// Backend sessions remembered at once. Older handles are forgotten; the
/// widget only ever continues its most recent session.
const MAX_TRACKED_SESSIONS: usize = 16;

#[derive(Debug, Serialize)]
struct LocalChatPayload<'a> {
    message: &'a str,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    session_id: Option<Value>,
    #[serde(rename = "stockContext")]
    stock_context: Option<&'a TickerContext>,
}

#[derive(Debug, Default, Deserialize)]
struct LocalChatResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default, rename = "sessionId")]
    session_id: Option<Value>,
    #[serde(default, rename = "conversationSummary")]
    conversation_summary: Option<String>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct LocalSuggestionsResponse {
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Integer handles for backend session tokens.
#[derive(Debug, Default)]
struct SessionTokens {
    last_handle: SessionId,
    by_handle: HashMap<SessionId, Value>,
    by_token: HashMap<String, SessionId>,
}

impl SessionTokens {
    fn handle_for(&mut self, token: Value) -> Option<SessionId> {
        if token.is_null() {
            return None;
        }
        let key = token.to_string();
        if let Some(handle) = self.by_token.get(&key) {
            return Some(*handle);
        }
        self.last_handle += 1;
        let handle = self.last_handle;
        self.by_token.insert(key, handle);
        self.by_handle.insert(handle, token);
        self.evict_oldest();
        Some(handle)
    }

    fn evict_oldest(&mut self) {
        while self.by_handle.len() > MAX_TRACKED_SESSIONS {
            let Some(oldest) = self.by_handle.keys().min().copied() else {
                break;
            };
            if let Some(token) = self.by_handle.remove(&oldest) {
                self.by_token.remove(&token.to_string());
            }
        }
    }

    fn token_for(&self, handle: Option<SessionId>) -> Option<Value> {
        handle.and_then(|h| self.by_handle.get(&h).cloned())
    }
}

fn error_message(error: &Value) -> Option<String> {
    match error {
        Value::String(message) => Some(message.clone()),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn token_query_value(token: &Value) -> String {
    match token {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub struct LocalBackendClient {
    client: Client,
    base_url: String,
    debug: bool,
    sessions: Mutex<SessionTokens>,
}

impl LocalBackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            debug: false,
            sessions: Mutex::new(SessionTokens::default()),
        }
    }

    pub fn from_config(config: &WidgetConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self::new(config.base_url())
            .with_client(client)
            .with_debug(config.debug_api))
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    fn tokens(&self) -> std::sync::MutexGuard<'_, SessionTokens> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ChatApiClient for LocalBackendClient {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn send_turn(&self, turn: &TurnRequest) -> Result<TurnReply> {
        let url = join_url(&self.base_url, CHAT_ENDPOINT);
        let payload = LocalChatPayload {
            message: &turn.text,
            session_id: self.tokens().token_for(turn.session_id),
            stock_context: turn.ticker.as_ref(),
        };

        log_api_call(self.debug, "chat", "POST", &url, Some(&payload));
        let (status, text) = post_json(&self.client, &url, &payload).await?;

        let decoded = serde_json::from_str::<LocalChatResponse>(&text);
        let body = match decoded {
            Ok(body) if body.error.is_some() => {
                return Err(ChatClientError::Api {
                    message: body.error.as_ref().and_then(error_message),
                    summary: body.conversation_summary,
                    suggestions: Vec::new(),
                });
            }
            Ok(body) if status.is_success() => body,
            Err(e) if status.is_success() => return Err(ChatClientError::Json(e)),
            _ => {
                return Err(ChatClientError::Http {
                    status: status.as_u16(),
                    body: text,
                })
            }
        };

        let session_id = body
            .session_id
            .and_then(|token| self.tokens().handle_for(token));

        Ok(TurnReply {
            reply: body.response.unwrap_or_default(),
            summary: body.conversation_summary.unwrap_or_default(),
            suggestions: Vec::new(),
            session_id,
            // The demo backend does not classify topics
            unrelated_topic_count: 0,
        })
    }

    async fn fetch_suggestions(
        &self,
        stage: SuggestionStage,
        ticker: Option<&TickerContext>,
        session_id: Option<SessionId>,
    ) -> Result<Vec<String>> {
        let url = join_url(&self.base_url, SUGGESTIONS_ENDPOINT);

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(ticker) = ticker {
            query.push(("stock", ticker.symbol.clone()));
        }
        if stage.is_follow_up() {
            query.push(("followup", "true".to_string()));
        }
        let token = self.tokens().token_for(session_id);
        if let Some(token) = token {
            query.push(("sessionId", token_query_value(&token)));
        }

        log_api_call(self.debug, "suggestions", "GET", &url, Some(&query));
        let response = self.client.get(&url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChatClientError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        let body: LocalSuggestionsResponse = response.json().await?;
        Ok(body.suggestions)
    }

    async fn health(&self) -> Result<()> {
        let url = join_url(&self.base_url, HEALTH_ENDPOINT);
        log_api_call::<()>(self.debug, "health", "GET", &url, None);
        probe_health(&self.client, &url).await
    }
}
