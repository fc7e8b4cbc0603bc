//! Dino Finder - fossil dig-site viewer core
//!
//! Plots fossil dig sites from a remote feed, looks up per-occurrence
//! paleontology records, and attaches Wikipedia summaries to marker popups.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and port traits
//! - **Service Layer** (`services`): cache, detail/annotation lookup, presenter, filter
//! - **Application Layer** (`application`): session wiring from configuration
//! - **Infrastructure Layer** (`infrastructure`): HTTP clients, storage, config, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use dino_finder::application::ViewerSession;
//! use dino_finder::infrastructure::config::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let session = ViewerSession::from_config(&config)?;
//!     let (viewer, _) = session.start().await;
//!     viewer.toggle("Tyrannosaurus rex").await;
//!     viewer.presenter().activate("42").await;
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{Viewer, ViewerSession};
pub use domain::models::{
    AnnotationDocument, Config, DetailRecord, DigSiteRecord, FilterSet, OccurrenceId, Snapshot,
    TaxonIndex,
};
pub use domain::ports::{AnnotationSource, DetailSource, FeedSource, MapSurface, SnapshotStore};
pub use domain::{ApiError, DomainError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    ActivationOutcome, AnnotationFetcher, DetailResolver, FilterController, LocalCache,
    MarkerPresenter, SiteCatalog,
};
