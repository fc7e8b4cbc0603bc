use async_trait::async_trait;

use crate::domain::errors::ApiError;

/// Encyclopedia page lookup returning raw HTML.
#[async_trait]
pub trait AnnotationSource: Send + Sync {
    /// Fetch the HTML document for `title` (already underscore-joined).
    async fn fetch_page(&self, title: &str) -> Result<String, ApiError>;

    /// Base URL that relative links inside returned pages resolve against.
    fn article_base(&self) -> &str;
}
