use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::dig_site::DigSiteRecord;

/// Number of dig sites recorded for one taxon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonCount {
    pub taxon_name: String,
    pub count: usize,
}

/// Alphabetical taxon list backing the filter panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonIndex(Vec<TaxonCount>);

impl TaxonIndex {
    /// Count dig sites per distinct taxon name, sorted by name.
    pub fn from_records(records: &[DigSiteRecord]) -> Self {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in records {
            *counts.entry(record.taxon_name.as_str()).or_default() += 1;
        }

        Self(
            counts
                .into_iter()
                .map(|(taxon_name, count)| TaxonCount {
                    taxon_name: taxon_name.to_string(),
                    count,
                })
                .collect(),
        )
    }

    /// Entries whose name contains `query`, ignoring case.
    ///
    /// An empty (or whitespace-only) query matches every entry.
    pub fn search(&self, query: &str) -> Vec<&TaxonCount> {
        let needle = query.trim().to_lowercase();
        self.0
            .iter()
            .filter(|entry| needle.is_empty() || entry.taxon_name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn entries(&self) -> &[TaxonCount] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
