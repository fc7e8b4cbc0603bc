use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::dig_site::DigSiteRecord;
use super::taxon::TaxonIndex;

/// Persisted copy of the dig-site feed.
///
/// Wire shape: `{ "birth": <epoch-millis>, "digs": [...], "taxonSummaryIndex": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub birth: DateTime<Utc>,

    pub digs: Vec<DigSiteRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxon_summary_index: Option<TaxonIndex>,
}

impl Snapshot {
    /// Build a snapshot stamped at `birth`, indexing its taxa.
    pub fn new(digs: Vec<DigSiteRecord>, birth: DateTime<Utc>) -> Self {
        let index = TaxonIndex::from_records(&digs);
        Self {
            birth,
            digs,
            taxon_summary_index: Some(index),
        }
    }

    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.birth
    }

    /// Valid while strictly younger than `ttl`.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age_at(now) < ttl
    }

    /// The stored index, or one computed from `digs` for older snapshots.
    pub fn taxon_index(&self) -> TaxonIndex {
        self.taxon_summary_index
            .clone()
            .unwrap_or_else(|| TaxonIndex::from_records(&self.digs))
    }
}
