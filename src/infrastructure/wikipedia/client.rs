use async_trait::async_trait;
use reqwest::{header, Client as ReqwestClient, Url};
use tracing::{debug, instrument};

use crate::domain::errors::ApiError;
use crate::domain::ports::AnnotationSource;
use crate::infrastructure::http::ensure_success;

/// Client for the REST `page/html/<title>` endpoint.
pub struct WikipediaClient {
    http_client: ReqwestClient,
    api_url: String,
    article_url: String,
}

impl WikipediaClient {
    /// # Arguments
    /// * `api_url` - HTML API base, e.g. `https://en.wikipedia.org/api/rest_v1/page/html`
    /// * `article_url` - article base relative links resolve against
    pub fn new(
        http_client: ReqwestClient,
        api_url: impl Into<String>,
        article_url: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            article_url: article_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `<api_url>/<title>` with the title percent-encoded as one segment.
    fn page_url(&self, title: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.api_url)))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .push(title);
        Ok(url)
    }
}

#[async_trait]
impl AnnotationSource for WikipediaClient {
    #[instrument(skip(self))]
    async fn fetch_page(&self, title: &str) -> Result<String, ApiError> {
        let url = self.page_url(title)?;
        debug!(%url, "GET page html");

        let response = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "text/html")
            .send()
            .await?;

        Ok(ensure_success(response).await?.text().await?)
    }

    fn article_base(&self) -> &str {
        &self.article_url
    }
}
