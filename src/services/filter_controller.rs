//! Taxon filter panel: marker restriction and taxon-list search.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::models::{DigSiteRecord, FilterSet, TaxonCount, TaxonIndex};
use crate::domain::ports::{AnnotationSource, DetailSource};
use crate::services::marker_presenter::MarkerPresenter;

/// Owns the FilterSet and re-renders the presenter whenever it changes.
pub struct FilterController<D: DetailSource, A: AnnotationSource> {
    presenter: Arc<MarkerPresenter<D, A>>,
    records: Vec<DigSiteRecord>,
    taxa: TaxonIndex,
    filter: RwLock<FilterSet>,
}

impl<D: DetailSource + 'static, A: AnnotationSource> FilterController<D, A> {
    pub fn new(
        presenter: Arc<MarkerPresenter<D, A>>,
        records: Vec<DigSiteRecord>,
        taxa: TaxonIndex,
    ) -> Self {
        Self {
            presenter,
            records,
            taxa,
            filter: RwLock::new(FilterSet::new()),
        }
    }

    pub fn presenter(&self) -> &MarkerPresenter<D, A> {
        &self.presenter
    }

    pub fn records(&self) -> &[DigSiteRecord] {
        &self.records
    }

    pub fn taxa(&self) -> &TaxonIndex {
        &self.taxa
    }

    pub async fn filter(&self) -> FilterSet {
        self.filter.read().await.clone()
    }

    /// Draw markers for the current filter. Returns the marker count.
    pub async fn render(&self) -> usize {
        let filter = self.filter.read().await;
        self.presenter.render(&self.records, &filter).await
    }

    /// Select `taxon` if unselected, deselect it otherwise, then re-render.
    ///
    /// Returns `true` when the taxon is selected afterwards.
    pub async fn toggle(&self, taxon: &str) -> bool {
        let mut filter = self.filter.write().await;
        let selected = filter.toggle(taxon);
        debug!(%taxon, selected, active = filter.len(), "filter toggled");
        self.presenter.render(&self.records, &filter).await;
        selected
    }

    /// Drop every selection (show all) and re-render.
    pub async fn clear(&self) -> usize {
        let mut filter = self.filter.write().await;
        filter.clear();
        self.presenter.render(&self.records, &filter).await
    }

    /// Taxon list entries matching `query`, ignoring case.
    ///
    /// Independent of the marker filter.
    pub fn search_taxa(&self, query: &str) -> Vec<&TaxonCount> {
        self.taxa.search(query)
    }
}
