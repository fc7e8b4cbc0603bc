//! Persisted dig-site snapshot with time-to-live expiry.

use chrono::Duration;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::errors::CacheError;
use crate::domain::models::{DigSiteRecord, Snapshot};
use crate::domain::ports::{Clock, SnapshotStore, SystemClock};

/// Default snapshot lifetime.
pub const DEFAULT_TTL_HOURS: u32 = 24;

/// What the slot currently holds, for status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CacheStatus {
    Empty,
    Corrupt,
    Present {
        sites: usize,
        age_secs: i64,
        fresh: bool,
    },
}

/// Single-slot snapshot cache over a `SnapshotStore`.
///
/// A slot that is missing, unreadable, malformed or older than the TTL
/// reads as absent.
pub struct LocalCache<S: SnapshotStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl<S: SnapshotStore> LocalCache<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            ttl: Duration::hours(i64::from(DEFAULT_TTL_HOURS)),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the snapshot if one exists and is younger than the TTL.
    pub async fn read(&self) -> Option<Snapshot> {
        let snapshot = self.load_snapshot().await?;
        let now = self.clock.now();

        if snapshot.is_fresh_at(now, self.ttl) {
            debug!(
                sites = snapshot.digs.len(),
                age_secs = snapshot.age_at(now).num_seconds(),
                "snapshot cache hit"
            );
            Some(snapshot)
        } else {
            debug!(
                age_secs = snapshot.age_at(now).num_seconds(),
                "snapshot expired"
            );
            None
        }
    }

    /// Overwrite the slot with `records` stamped at the current time.
    pub async fn write(&self, records: Vec<DigSiteRecord>) -> Result<Snapshot, CacheError> {
        let snapshot = Snapshot::new(records, self.clock.now());
        let contents = serde_json::to_string(&snapshot)?;
        self.store.save(&contents).await?;
        Ok(snapshot)
    }

    pub async fn clear(&self) -> Result<(), CacheError> {
        self.store.clear().await
    }

    pub async fn status(&self) -> Result<CacheStatus, CacheError> {
        let Some(contents) = self.store.load().await? else {
            return Ok(CacheStatus::Empty);
        };

        let Ok(snapshot) = serde_json::from_str::<Snapshot>(&contents) else {
            return Ok(CacheStatus::Corrupt);
        };

        let now = self.clock.now();
        Ok(CacheStatus::Present {
            sites: snapshot.digs.len(),
            age_secs: snapshot.age_at(now).num_seconds(),
            fresh: snapshot.is_fresh_at(now, self.ttl),
        })
    }

    async fn load_snapshot(&self) -> Option<Snapshot> {
        let contents = match self.store.load().await {
            Ok(Some(contents)) => contents,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "snapshot slot unreadable, treating as miss");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = %e, "snapshot slot malformed, treating as miss");
                None
            }
        }
    }
}
