use async_trait::async_trait;

use crate::domain::errors::ApiError;
use crate::domain::models::DetailRecord;

/// Remote lookup of the expanded record for one occurrence.
#[async_trait]
pub trait DetailSource: Send + Sync {
    /// Look up the occurrence by its local identifier (`42` for `occ:42`).
    ///
    /// # Returns
    /// * `Ok(record)` - the first record the provider returned
    /// * `Err(ApiError::NotFound)` - the provider returned no records
    /// * `Err(ApiError)` - transport or decoding failure
    async fn fetch_detail(&self, local_id: &str) -> Result<DetailRecord, ApiError>;
}
