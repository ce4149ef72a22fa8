use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::error::{ChatClientError, Result};

pub(crate) fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Log an outgoing call. Payloads go to `info` when API debugging is on.
pub(crate) fn log_api_call<B: Serialize + ?Sized>(
    debug: bool,
    endpoint: &str,
    method: &str,
    url: &str,
    body: Option<&B>,
) {
    let body = body
        .and_then(|b| serde_json::to_string(b).ok())
        .unwrap_or_default();
    if debug {
        log::info!("[API Call] {} {}: {} {}", method, endpoint, url, body);
    } else {
        log::debug!("{} {} -> {}", method, endpoint, url);
    }
}

/// POST a JSON body and return the status with the raw response text.
pub(crate) async fn post_json<B: Serialize + ?Sized>(
    client: &Client,
    url: &str,
    body: &B,
) -> Result<(StatusCode, String)> {
    let response = client.post(url).json(body).send().await?;
    let status = response.status();
    let text = response.text().await?;
    Ok((status, text))
}

/// GET a health endpoint; any 2xx counts as healthy.
pub(crate) async fn probe_health(client: &Client, url: &str) -> Result<()> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(ChatClientError::Http {
        status: status.as_u16(),
        body,
    })
}
