use anyhow::{Context, Result};
use chrono::Duration;
use std::sync::Arc;
use tracing::info;

use crate::domain::models::Config;
use crate::domain::ports::MapSurface;
use crate::infrastructure::feed::FeedClient;
use crate::infrastructure::http::build_client;
use crate::infrastructure::paleobiodb::PaleoDbClient;
use crate::infrastructure::storage::FileSnapshotStore;
use crate::infrastructure::surface::InMemoryMapSurface;
use crate::infrastructure::wikipedia::WikipediaClient;
use crate::services::{
    AnnotationFetcher, Catalog, CatalogSource, DetailResolver, FilterController, LocalCache,
    MarkerPresenter, PopupRegistry, SiteCatalog,
};

/// Filter controller over the production adapters.
pub type Viewer = FilterController<PaleoDbClient, WikipediaClient>;

/// Everything one viewing session needs, built from configuration.
///
/// The detail cache and popup registry live here and die with the session.
pub struct ViewerSession {
    catalog: SiteCatalog<FeedClient, FileSnapshotStore>,
    presenter: Arc<MarkerPresenter<PaleoDbClient, WikipediaClient>>,
    surface: Arc<InMemoryMapSurface>,
}

impl ViewerSession {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = build_client(&config.http).context("Failed to build HTTP client")?;
        let surface = Arc::new(InMemoryMapSurface::new());
        let dyn_surface: Arc<dyn MapSurface> = surface.clone();

        let cache = LocalCache::new(Arc::new(FileSnapshotStore::new(&config.cache.path)))
            .with_ttl(Duration::hours(i64::from(config.cache.ttl_hours)));
        let catalog = SiteCatalog::new(
            Arc::new(FeedClient::new(http.clone(), &config.endpoints.feed_url)),
            cache,
            Arc::clone(&dyn_surface),
        );

        let resolver = Arc::new(DetailResolver::new(Arc::new(PaleoDbClient::new(
            http.clone(),
            &config.endpoints.detail_url,
        ))));
        let annotations = Arc::new(AnnotationFetcher::new(Arc::new(WikipediaClient::new(
            http,
            &config.endpoints.wiki_api_url,
            &config.endpoints.wiki_url,
        ))));

        let presenter = Arc::new(
            MarkerPresenter::new(
                resolver,
                annotations,
                Arc::new(PopupRegistry::new()),
                dyn_surface,
            )
            .with_zoom_range(config.map.min_zoom, config.map.max_zoom),
        );

        Ok(Self {
            catalog,
            presenter,
            surface,
        })
    }

    pub const fn catalog(&self) -> &SiteCatalog<FeedClient, FileSnapshotStore> {
        &self.catalog
    }

    pub fn surface(&self) -> &InMemoryMapSurface {
        &self.surface
    }

    /// Load the dig sites and draw the unfiltered marker set.
    pub async fn start(&self) -> (Viewer, CatalogSource) {
        let catalog = self.catalog.load().await;
        self.open(catalog).await
    }

    /// Like `start`, but refetch the feed even if the snapshot is valid.
    pub async fn start_refreshed(&self) -> (Viewer, CatalogSource) {
        let catalog = self.catalog.refresh().await;
        self.open(catalog).await
    }

    async fn open(&self, catalog: Catalog) -> (Viewer, CatalogSource) {
        let source = catalog.source;
        let viewer = FilterController::new(Arc::clone(&self.presenter), catalog.records, catalog.taxa);
        let markers = viewer.render().await;
        info!(?source, markers, "viewer started");
        (viewer, source)
    }
}
