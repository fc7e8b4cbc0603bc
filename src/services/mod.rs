//! Orchestration services
//!
//! - LocalCache: persisted feed snapshot with TTL
//! - SiteCatalog: cache-or-feed bootstrap
//! - DetailResolver: memoized occurrence details
//! - AnnotationFetcher: encyclopedia summaries with fallback
//! - MarkerPresenter: markers and popup toggling
//! - FilterController: taxon filter and taxon-list search

pub mod annotation_fetcher;
pub mod detail_resolver;
pub mod filter_controller;
pub mod local_cache;
pub mod marker_presenter;
pub mod site_catalog;

pub use annotation_fetcher::AnnotationFetcher;
pub use detail_resolver::{DetailResolver, DetailState};
pub use filter_controller::FilterController;
pub use local_cache::{CacheStatus, LocalCache};
pub use marker_presenter::{ActivationOutcome, MarkerPresenter, PopupRegistry};
pub use site_catalog::{Catalog, CatalogSource, SiteCatalog};
