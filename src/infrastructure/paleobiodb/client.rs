use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use tracing::{debug, instrument};

use crate::domain::errors::ApiError;
use crate::domain::models::{DetailEnvelope, DetailRecord};
use crate::domain::ports::DetailSource;
use crate::infrastructure::http::ensure_success;

/// Client for the occurrence detail endpoint (`occs/single.json?id=<id>`).
pub struct PaleoDbClient {
    http_client: ReqwestClient,
    detail_url: String,
}

impl PaleoDbClient {
    pub fn new(http_client: ReqwestClient, detail_url: impl Into<String>) -> Self {
        Self {
            http_client,
            detail_url: detail_url.into(),
        }
    }
}

#[async_trait]
impl DetailSource for PaleoDbClient {
    #[instrument(skip(self))]
    async fn fetch_detail(&self, local_id: &str) -> Result<DetailRecord, ApiError> {
        debug!(url = %self.detail_url, "GET occurrence detail");

        let response = self
            .http_client
            .get(&self.detail_url)
            .query(&[("id", local_id)])
            .send()
            .await?;
        let body = ensure_success(response).await?.bytes().await?;

        let envelope: DetailEnvelope =
            serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

        envelope
            .into_first()
            .ok_or_else(|| ApiError::NotFound(format!("no records for occurrence {local_id}")))
    }
}
