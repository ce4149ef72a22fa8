use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatClientError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("API error: {}", .message.as_deref().unwrap_or("External API error"))]
    Api {
        message: Option<String>,
        summary: Option<String>,
        suggestions: Vec<String>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ChatClientError {
    /// True for failures where no usable answer came back from the server
    /// (connectivity, CORS-style rejections, timeouts, bare HTTP errors).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Timeout(_) | Self::Http { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ChatClientError>;
