//! Client Factory
//!
//! Creates the chat API adapter selected by configuration.

use std::sync::Arc;

use chat_core::{BackendKind, WidgetConfig};

use crate::client_trait::ChatApiClient;
use crate::error::{ChatClientError, Result};
use crate::providers::{ExternalChatClient, LocalBackendClient};

/// Available backend names
pub const AVAILABLE_BACKENDS: &[&str] = &["external", "local"];

/// Create a client based on the current configuration
pub fn create_client(config: &WidgetConfig) -> Result<Arc<dyn ChatApiClient>> {
    let base_url = config.base_url();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ChatClientError::InvalidConfig(format!(
            "API base URL must be http(s): '{}'",
            base_url
        )));
    }

    let client: Arc<dyn ChatApiClient> = match config.backend {
        BackendKind::External => Arc::new(ExternalChatClient::from_config(config)?),
        BackendKind::Local => Arc::new(LocalBackendClient::from_config(config)?),
    };

    log::info!(
        "Chat client '{}' configured for {} (timeout {:?})",
        client.name(),
        base_url,
        config.request_timeout()
    );
    Ok(client)
}
