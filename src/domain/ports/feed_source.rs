use async_trait::async_trait;

use crate::domain::errors::ApiError;
use crate::domain::models::DigSiteRecord;

/// Source of the authoritative dig-site list.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch every dig site in one round-trip.
    ///
    /// No retry and no pagination: callers decide how to degrade.
    async fn fetch(&self) -> Result<Vec<DigSiteRecord>, ApiError>;
}
