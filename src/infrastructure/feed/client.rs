use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use tracing::{debug, info, instrument};

use crate::domain::errors::ApiError;
use crate::domain::models::DigSiteRecord;
use crate::domain::ports::FeedSource;
use crate::infrastructure::http::ensure_success;

/// HTTP client for the dig-site feed.
///
/// One GET per call, no retry and no pagination.
pub struct FeedClient {
    http_client: ReqwestClient,
    feed_url: String,
}

impl FeedClient {
    pub fn new(http_client: ReqwestClient, feed_url: impl Into<String>) -> Self {
        Self {
            http_client,
            feed_url: feed_url.into(),
        }
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    #[instrument(skip(self), fields(url = %self.feed_url))]
    async fn fetch(&self) -> Result<Vec<DigSiteRecord>, ApiError> {
        debug!("GET dig-site feed");

        let response = self.http_client.get(&self.feed_url).send().await?;
        let body = ensure_success(response).await?.bytes().await?;

        let records: Vec<DigSiteRecord> =
            serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

        info!(count = records.len(), "fetched dig-site feed");
        Ok(records)
    }
}
