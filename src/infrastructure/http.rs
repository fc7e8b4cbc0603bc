//! Shared reqwest client construction and response handling

use reqwest::{Client as ReqwestClient, Response};
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::errors::ApiError;
use crate::domain::models::HttpConfig;

/// Build the HTTP client shared by every adapter.
///
/// Connection pooling comes from reusing the returned client; clone it
/// rather than building one per adapter.
pub fn build_client(config: &HttpConfig) -> Result<ReqwestClient, ApiError> {
    debug!(
        timeout_secs = config.timeout_secs,
        user_agent = %config.user_agent,
        "building HTTP client"
    );

    let client = ReqwestClient::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .pool_max_idle_per_host(4)
        .gzip(true)
        .build()?;

    Ok(client)
}

/// Pass 2xx responses through; classify everything else by status.
pub async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error body".to_string());

    warn!(%url, %status, "upstream returned an error status");
    Err(ApiError::from_status(status, body))
}
