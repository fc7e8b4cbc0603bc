use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::CacheError;
use crate::domain::ports::SnapshotStore;

/// Snapshot slot that lives only as long as the process.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    slot: RwLock<Option<String>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the slot with raw contents (valid or not).
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(contents.into())),
        }
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self) -> Result<Option<String>, CacheError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, contents: &str) -> Result<(), CacheError> {
        *self.slot.write().await = Some(contents.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        *self.slot.write().await = None;
        Ok(())
    }
}
