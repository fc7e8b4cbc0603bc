//! Bootstrap of the dig-site list: snapshot cache first, feed second.

use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::domain::models::{DigSiteRecord, Notice, TaxonIndex};
use crate::domain::ports::{FeedSource, MapSurface, SnapshotStore};
use crate::services::local_cache::LocalCache;

/// Where the loaded records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    /// A snapshot younger than the TTL
    Cache,
    /// A fresh feed fetch
    Remote,
    /// The feed failed and no valid snapshot existed
    Unavailable,
}

/// Records available to the viewer plus their taxon index.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub records: Vec<DigSiteRecord>,
    pub taxa: TaxonIndex,
    pub source: CatalogSource,
}

impl Catalog {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            taxa: TaxonIndex::default(),
            source: CatalogSource::Unavailable,
        }
    }
}

pub struct SiteCatalog<F: FeedSource, S: SnapshotStore> {
    feed: Arc<F>,
    cache: LocalCache<S>,
    surface: Arc<dyn MapSurface>,
}

impl<F: FeedSource, S: SnapshotStore> SiteCatalog<F, S> {
    pub fn new(feed: Arc<F>, cache: LocalCache<S>, surface: Arc<dyn MapSurface>) -> Self {
        Self {
            feed,
            cache,
            surface,
        }
    }

    pub const fn cache(&self) -> &LocalCache<S> {
        &self.cache
    }

    /// Load dig sites, preferring a valid snapshot.
    ///
    /// A feed failure never propagates: it is logged, a notice is posted to
    /// the surface and an empty catalog is returned so the map still renders.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Catalog {
        if let Some(snapshot) = self.cache.read().await {
            info!(sites = snapshot.digs.len(), "using cached dig sites");
            let taxa = snapshot.taxon_index();
            return Catalog {
                records: snapshot.digs,
                taxa,
                source: CatalogSource::Cache,
            };
        }

        self.refresh().await
    }

    /// Fetch the feed regardless of the snapshot and overwrite it.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Catalog {
        let records = match self.feed.fetch().await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "dig-site feed unavailable");
                self.surface
                    .notify(Notice::error(format!("Could not load dig sites: {e}")));
                return Catalog::empty();
            }
        };

        match self.cache.write(records.clone()).await {
            Ok(snapshot) => Catalog {
                taxa: snapshot.taxon_index(),
                records,
                source: CatalogSource::Remote,
            },
            Err(e) => {
                warn!(error = %e, "failed to persist dig-site snapshot");
                Catalog {
                    taxa: TaxonIndex::from_records(&records),
                    records,
                    source: CatalogSource::Remote,
                }
            }
        }
    }
}
