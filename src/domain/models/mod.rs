pub mod annotation;
pub mod config;
pub mod detail;
pub mod dig_site;
pub mod filter;
pub mod marker;
pub mod snapshot;
pub mod taxon;

pub use annotation::{AnnotationDocument, AnnotationLink, AnnotationQuery};
pub use config::{
    CacheConfig, Config, EndpointsConfig, HttpConfig, LoggingConfig, MapConfig,
};
pub use detail::{DetailEnvelope, DetailRecord};
pub use dig_site::{DigSiteRecord, OccurrenceId};
pub use filter::{normalize_taxon, FilterSet};
pub use marker::{LatLng, Marker, Notice, NoticeLevel, PopupHandle};
pub use snapshot::Snapshot;
pub use taxon::{TaxonCount, TaxonIndex};
