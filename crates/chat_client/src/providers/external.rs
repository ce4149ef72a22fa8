use async_trait::async_trait;
use chat_core::{is_established, WidgetConfig};
use reqwest::Client;

use crate::client_trait::ChatApiClient;
use crate::error::{ChatClientError, Result};
use crate::models::{parse_response, ChatTurnPayload, ChatTurnResponse, TurnReply, TurnRequest};

use super::common::{join_url, log_api_call, post_json, probe_health};

pub const CHAT_ENDPOINT: &str = "/api/StockChatApi/chat";
pub const HEALTH_ENDPOINT: &str = "/api/health";

/// Adapter for the hosted StockChat API.
pub struct ExternalChatClient {
    client: Client,
    base_url: String,
    debug: bool,
}

impl ExternalChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            debug: false,
        }
    }

    /// Build from config, with the configured request timeout.
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

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn decode(status: reqwest::StatusCode, text: String) -> Result<TurnReply> {
        match serde_json::from_str::<ChatTurnResponse>(&text) {
            // HTTP 200 with an error body is still a failure
            Ok(payload) if payload.error.is_some() => parse_response(payload),
            Ok(payload) if status.is_success() => parse_response(payload),
            Err(e) if status.is_success() => Err(ChatClientError::Json(e)),
            _ => Err(ChatClientError::Http {
                status: status.as_u16(),
                body: text,
            }),
        }
    }
}

#[async_trait]
impl ChatApiClient for ExternalChatClient {
    fn name(&self) -> &'static str {
        "external"
    }

    async fn send_turn(&self, turn: &TurnRequest) -> Result<TurnReply> {
        let url = join_url(&self.base_url, CHAT_ENDPOINT);
        let payload = ChatTurnPayload::from(turn);

        log_api_call(self.debug, "chat", "POST", &url, Some(&payload));
        log::debug!(
            "Session info: current={:?}, will_create_new={}",
            turn.session_id,
            !is_established(turn.session_id)
        );

        let (status, text) = post_json(&self.client, &url, &payload).await?;
        let reply = Self::decode(status, text)?;

        log::debug!(
            "Chat reply received: session_id={:?}, unrelated_topic_count={}",
            reply.session_id,
            reply.unrelated_topic_count
        );
        Ok(reply)
    }

    async fn health(&self) -> Result<()> {
        let url = join_url(&self.base_url, HEALTH_ENDPOINT);
        log_api_call::<()>(self.debug, "health", "GET", &url, None);
        probe_health(&self.client, &url).await
    }
}
