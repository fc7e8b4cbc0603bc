//! Session-wide memoization of occurrence details.

use moka::future::Cache;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, instrument};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::DetailRecord;
use crate::domain::ports::DetailSource;

/// Lifecycle of one identifier in the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailState {
    Unfetched,
    Fetching,
    Cached,
}

/// Resolves occurrence details, fetching each identifier at most once per
/// session.
///
/// Concurrent resolves of the same uncached identifier share one request.
/// Failed lookups are not cached, so the identifier can be retried. There
/// is no eviction: the cache lives as long as the resolver.
pub struct DetailResolver<D: DetailSource> {
    source: Arc<D>,
    cache: Cache<String, Arc<DetailRecord>>,
    in_flight: Mutex<HashSet<String>>,
}

impl<D: DetailSource + 'static> DetailResolver<D> {
    pub fn new(source: Arc<D>) -> Self {
        Self {
            source,
            cache: Cache::builder().build(),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Return the detail for `local_id`, fetching it if needed.
    #[instrument(skip(self))]
    pub async fn resolve(&self, local_id: &str) -> DomainResult<Arc<DetailRecord>> {
        if let Some(record) = self.cache.get(local_id).await {
            debug!("detail cache hit");
            return Ok(record);
        }

        let source = Arc::clone(&self.source);
        let id = local_id.to_string();
        let init = async move {
            let _guard = InFlight::enter(&self.in_flight, &id);
            debug!(local_id = %id, "fetching occurrence detail");
            source.fetch_detail(&id).await.map(Arc::new)
        };

        self.cache
            .try_get_with(local_id.to_string(), init)
            .await
            .map_err(|source| DomainError::DetailFailed {
                id: local_id.to_string(),
                source,
            })
    }

    pub fn state(&self, local_id: &str) -> DetailState {
        if self.cache.contains_key(local_id) {
            DetailState::Cached
        } else if self.lock_in_flight().contains(local_id) {
            DetailState::Fetching
        } else {
            DetailState::Unfetched
        }
    }

    /// Cached detail without triggering a fetch.
    pub async fn cached(&self, local_id: &str) -> Option<Arc<DetailRecord>> {
        self.cache.get(local_id).await
    }

    /// Number of cached details.
    pub async fn len(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn lock_in_flight(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks an identifier as `Fetching` for the lifetime of the guard.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<String>>,
    id: String,
}

impl<'a> InFlight<'a> {
    fn enter(set: &'a Mutex<HashSet<String>>, id: &str) -> Self {
        set.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string());
        Self {
            set,
            id: id.to_string(),
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}
