use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::dig_site::OccurrenceId;

/// Expanded occurrence record returned by the detail lookup.
///
/// Only the fields the viewer reads are typed; everything else the
/// provider sends is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    #[serde(rename = "oid")]
    pub occurrence_id: OccurrenceId,

    /// Accepted taxon name, used for the annotation lookup
    #[serde(rename = "tna")]
    pub taxon_name: String,

    #[serde(rename = "cid", default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,

    /// Name as identified in the source reference
    #[serde(rename = "idn", default, skip_serializing_if = "Option::is_none")]
    pub identified_name: Option<String>,

    #[serde(rename = "rnk", default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,

    #[serde(rename = "tid", default, skip_serializing_if = "Option::is_none")]
    pub taxon_id: Option<String>,

    /// Early interval name
    #[serde(rename = "oei", default, skip_serializing_if = "Option::is_none")]
    pub early_interval: Option<String>,

    #[serde(rename = "eag", default, skip_serializing_if = "Option::is_none")]
    pub early_age: Option<f64>,

    #[serde(rename = "lag", default, skip_serializing_if = "Option::is_none")]
    pub late_age: Option<f64>,

    /// Reference identifier
    #[serde(rename = "rid", default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire envelope of the detail endpoint: `{ "records": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailEnvelope {
    #[serde(default)]
    pub records: Vec<DetailRecord>,
}

impl DetailEnvelope {
    /// The lookup is by id, so only the first record matters.
    pub fn into_first(self) -> Option<DetailRecord> {
        self.records.into_iter().next()
    }
}
