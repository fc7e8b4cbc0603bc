use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Normalize a taxon name into a filter key.
///
/// Keys are lower-cased with spaces replaced by underscores, so
/// `"Tyrannosaurus rex"` and `"tyrannosaurus_rex"` select the same taxon.
pub fn normalize_taxon(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// The set of taxa the user opted to display. Empty means "show all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    taxa: BTreeSet<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the taxon if absent, remove it if present.
    ///
    /// Returns `true` when the taxon is selected after the call.
    pub fn toggle(&mut self, taxon: &str) -> bool {
        let key = normalize_taxon(taxon);
        if self.taxa.remove(&key) {
            false
        } else {
            self.taxa.insert(key);
            true
        }
    }

    pub fn contains(&self, taxon: &str) -> bool {
        self.taxa.contains(&normalize_taxon(taxon))
    }

    /// Whether a record with this taxon should be shown.
    pub fn allows(&self, taxon: &str) -> bool {
        self.taxa.is_empty() || self.contains(taxon)
    }

    pub fn clear(&mut self) {
        self.taxa.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.taxa.is_empty()
    }

    pub fn len(&self) -> usize {
        self.taxa.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.taxa.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for FilterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            taxa: iter
                .into_iter()
                .map(|taxon| normalize_taxon(taxon.as_ref()))
                .collect(),
        }
    }
}
