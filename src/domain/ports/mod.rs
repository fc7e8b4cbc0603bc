//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces infrastructure adapters implement:
//! - FeedSource: the dig-site feed
//! - DetailSource: per-occurrence detail lookups
//! - AnnotationSource: encyclopedia HTML by page title
//! - SnapshotStore: the single persisted snapshot slot
//! - MapSurface: the map widget markers and popups are drawn on
//! - Clock: wall-clock time for cache expiry
//!
//! These traits keep the orchestration services independent of HTTP,
//! the filesystem and the rendering toolkit.

pub mod annotation_source;
pub mod clock;
pub mod detail_source;
pub mod feed_source;
pub mod map_surface;
pub mod snapshot_store;

pub use annotation_source::AnnotationSource;
pub use clock::{Clock, FixedClock, SystemClock};
pub use detail_source::DetailSource;
pub use feed_source::FeedSource;
pub use map_surface::MapSurface;
pub use snapshot_store::SnapshotStore;
