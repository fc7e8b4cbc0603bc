use serde::{Deserialize, Serialize};
use std::fmt;

use super::marker::LatLng;

/// Composite occurrence identifier in `namespace:local` form (e.g. `occ:42`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccurrenceId(String);

impl OccurrenceId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Namespace part, if the identifier carries one
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once(':').map(|(ns, _)| ns)
    }

    /// Local part used for markers, detail lookups and cache keys.
    ///
    /// An identifier without a namespace is its own local part.
    pub fn local(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(_, local)| local)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One fossil occurrence from the dig-site feed.
///
/// Field names follow the feed's short keys; the descriptive names are
/// accepted on input so hand-written fixtures and older snapshots load too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigSiteRecord {
    /// Occurrence identifier (`oid`)
    #[serde(rename = "oid", alias = "occurrenceId")]
    pub occurrence_id: OccurrenceId,

    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,

    #[serde(rename = "lng", alias = "longitude")]
    pub longitude: f64,

    /// Accepted taxon name (`tna`)
    #[serde(rename = "tna", alias = "taxonName")]
    pub taxon_name: String,

    /// Collection identifier
    #[serde(rename = "cid", default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,

    /// Early interval bound, in Ma
    #[serde(rename = "eag", default, skip_serializing_if = "Option::is_none")]
    pub early_age: Option<f64>,

    /// Late interval bound, in Ma
    #[serde(rename = "lag", default, skip_serializing_if = "Option::is_none")]
    pub late_age: Option<f64>,

    /// Taxonomic rank code
    #[serde(rename = "rnk", default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

impl DigSiteRecord {
    pub fn new(
        occurrence_id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        taxon_name: impl Into<String>,
    ) -> Self {
        Self {
            occurrence_id: OccurrenceId::new(occurrence_id),
            latitude,
            longitude,
            taxon_name: taxon_name.into(),
            collection_id: None,
            early_age: None,
            late_age: None,
            rank: None,
        }
    }

    pub fn local_id(&self) -> &str {
        self.occurrence_id.local()
    }

    pub const fn position(&self) -> LatLng {
        LatLng {
            lat: self.latitude,
            lng: self.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_part_of_namespaced_id() {
        let id = OccurrenceId::new("occ:42");
        assert_eq!(id.namespace(), Some("occ"));
        assert_eq!(id.local(), "42");
    }

    #[test]
    fn test_local_part_without_namespace() {
        let id = OccurrenceId::new("1234");
        assert_eq!(id.namespace(), None);
        assert_eq!(id.local(), "1234");
    }

    #[test]
    fn test_local_part_keeps_extra_colons() {
        let id = OccurrenceId::new("occ:a:b");
        assert_eq!(id.local(), "a:b");
    }

    #[test]
    fn test_deserialize_feed_short_names() {
        let json = r#"{"oid":"occ:7","lat":48.2,"lng":16.3,"tna":"Iguanodon bernissartensis","cid":"col:9","eag":125.0,"lag":113.0,"rnk":3}"#;
        let record: DigSiteRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.local_id(), "7");
        assert_eq!(record.taxon_name, "Iguanodon bernissartensis");
        assert_eq!(record.collection_id.as_deref(), Some("col:9"));
        assert_eq!(record.rank, Some(3));
    }

    #[test]
    fn test_deserialize_descriptive_aliases() {
        let json = r#"{"occurrenceId":"occ:42","latitude":10,"longitude":20,"taxonName":"Triceratops horridus"}"#;
        let record: DigSiteRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.local_id(), "42");
        assert_eq!(record.position(), LatLng { lat: 10.0, lng: 20.0 });
        assert!(record.early_age.is_none());
    }

    #[test]
    fn test_serialize_omits_missing_provider_fields() {
        let record = DigSiteRecord::new("occ:1", 1.0, 2.0, "Stegosaurus");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["oid"], "occ:1");
        assert!(value.get("cid").is_none());
    }
}
