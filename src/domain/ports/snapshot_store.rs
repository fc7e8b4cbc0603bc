use async_trait::async_trait;

use crate::domain::errors::CacheError;

/// A single persisted slot holding the serialized feed snapshot.
///
/// The slot is opaque text: decoding and expiry belong to the
/// `LocalCache` service so a corrupt slot can be treated as a miss.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Raw slot contents, `Ok(None)` when nothing has been written.
    async fn load(&self) -> Result<Option<String>, CacheError>;

    /// Replace the slot wholesale.
    async fn save(&self, contents: &str) -> Result<(), CacheError>;

    /// Remove the slot. Clearing an empty slot is not an error.
    async fn clear(&self) -> Result<(), CacheError>;
}
