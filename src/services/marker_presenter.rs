//! Marker binding and the click -> detail -> annotation -> popup chain.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument};

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    AnnotationDocument, DigSiteRecord, FilterSet, Marker, Notice, PopupHandle,
};
use crate::domain::ports::{AnnotationSource, DetailSource, MapSurface};
use crate::services::annotation_fetcher::AnnotationFetcher;
use crate::services::detail_resolver::DetailResolver;

/// Result of activating (clicking) a marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum ActivationOutcome {
    /// A popup was opened and recorded for the marker
    Opened(PopupHandle),
    /// The marker's open popup was closed
    Closed,
    /// A lookup was still pending; it will not open a popup
    Cancelled,
    /// The lookup finished after being cancelled; nothing was opened
    Superseded,
    /// No rendered marker has this identifier
    UnknownMarker,
    /// Detail or annotation lookup failed; nothing was opened
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PopupEntry {
    Pending(u64),
    Open(PopupHandle),
}

/// Identifier -> popup mapping for one viewing session.
///
/// Holds at most one entry per identifier: either a pending lookup ticket
/// or the handle of the open popup.
#[derive(Debug, Default)]
pub struct PopupRegistry {
    entries: Mutex<HashMap<String, PopupEntry>>,
    next_ticket: AtomicU64,
}

impl PopupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifiers with an open popup, sorted.
    pub async fn open_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .entries
            .lock()
            .await
            .iter()
            .filter(|(_, entry)| matches!(entry, PopupEntry::Open(_)))
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    pub async fn handle_for(&self, id: &str) -> Option<PopupHandle> {
        match self.entries.lock().await.get(id) {
            Some(PopupEntry::Open(handle)) => Some(*handle),
            _ => None,
        }
    }

    pub async fn is_pending(&self, id: &str) -> bool {
        matches!(self.entries.lock().await.get(id), Some(PopupEntry::Pending(_)))
    }

    fn ticket(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::Relaxed)
    }
}

pub struct MarkerPresenter<D: DetailSource, A: AnnotationSource> {
    resolver: Arc<DetailResolver<D>>,
    annotations: Arc<AnnotationFetcher<A>>,
    popups: Arc<PopupRegistry>,
    surface: Arc<dyn MapSurface>,
    markers: RwLock<HashMap<String, Marker>>,
    zoom_range: (u8, u8),
}

impl<D: DetailSource + 'static, A: AnnotationSource> MarkerPresenter<D, A> {
    pub fn new(
        resolver: Arc<DetailResolver<D>>,
        annotations: Arc<AnnotationFetcher<A>>,
        popups: Arc<PopupRegistry>,
        surface: Arc<dyn MapSurface>,
    ) -> Self {
        Self {
            resolver,
            annotations,
            popups,
            surface,
            markers: RwLock::new(HashMap::new()),
            zoom_range: (5, 15),
        }
    }

    /// Zoom levels between which markers are displayed.
    pub const fn with_zoom_range(mut self, min_zoom: u8, max_zoom: u8) -> Self {
        self.zoom_range = (min_zoom, max_zoom);
        self
    }

    pub fn resolver(&self) -> &DetailResolver<D> {
        &self.resolver
    }

    pub fn popups(&self) -> &PopupRegistry {
        &self.popups
    }

    /// Identifiers whose popup is currently open.
    pub async fn open_popups(&self) -> Vec<String> {
        self.popups.open_ids().await
    }

    /// Replace the markers with one per record allowed by `filter`.
    ///
    /// Popups and pending lookups of markers that disappear are dropped.
    /// Returns the number of markers drawn.
    #[instrument(skip_all, fields(records = records.len(), filter = filter.len()))]
    pub async fn render(&self, records: &[DigSiteRecord], filter: &FilterSet) -> usize {
        let (min_zoom, max_zoom) = self.zoom_range;
        let visible: Vec<Marker> = records
            .iter()
            .filter(|record| filter.allows(&record.taxon_name))
            .map(|record| Marker {
                id: record.local_id().to_string(),
                title: record.local_id().to_string(),
                position: record.position(),
                taxon: record.taxon_name.clone(),
                min_zoom,
                max_zoom,
            })
            .collect();

        self.surface.set_markers(&visible);

        let mut markers = self.markers.write().await;
        *markers = visible
            .into_iter()
            .map(|marker| (marker.id.clone(), marker))
            .collect();

        let mut entries = self.popups.entries.lock().await;
        entries.retain(|id, entry| {
            let keep = markers.contains_key(id);
            if let (false, PopupEntry::Open(handle)) = (keep, *entry) {
                self.surface.close_popup(handle);
            }
            keep
        });

        info!(markers = markers.len(), "markers rendered");
        markers.len()
    }

    /// Currently rendered markers, sorted by identifier.
    pub async fn markers(&self) -> Vec<Marker> {
        let mut markers: Vec<Marker> = self.markers.read().await.values().cloned().collect();
        markers.sort_by(|a, b| a.id.cmp(&b.id));
        markers
    }

    /// Handle a click on the marker titled `id`.
    ///
    /// Toggles: an open popup is closed, a pending lookup is cancelled,
    /// otherwise the detail and annotation are looked up and a popup opened.
    #[instrument(skip(self))]
    pub async fn activate(&self, id: &str) -> ActivationOutcome {
        let Some(marker) = self.markers.read().await.get(id).cloned() else {
            debug!("activation of unknown marker");
            return ActivationOutcome::UnknownMarker;
        };

        let ticket = {
            let mut entries = self.popups.entries.lock().await;
            match entries.remove(id) {
                Some(PopupEntry::Open(handle)) => {
                    self.surface.close_popup(handle);
                    debug!(%handle, "popup toggled off");
                    return ActivationOutcome::Closed;
                }
                Some(PopupEntry::Pending(_)) => {
                    debug!("pending lookup cancelled");
                    return ActivationOutcome::Cancelled;
                }
                None => {}
            }
            let ticket = self.popups.ticket();
            entries.insert(id.to_string(), PopupEntry::Pending(ticket));
            ticket
        };

        let result = self.lookup(id).await;

        let mut entries = self.popups.entries.lock().await;
        let still_pending = entries.get(id) == Some(&PopupEntry::Pending(ticket));

        match result {
            Ok(_) if !still_pending => {
                debug!("lookup finished after cancellation");
                ActivationOutcome::Superseded
            }
            Ok(document) => {
                let handle = self
                    .surface
                    .open_popup(&marker.id, marker.position, &document.html);
                entries.insert(id.to_string(), PopupEntry::Open(handle));
                info!(%handle, title = %document.title, "popup opened");
                ActivationOutcome::Opened(handle)
            }
            Err(e) if !still_pending => {
                debug!(error = %e, "lookup failed after cancellation");
                ActivationOutcome::Superseded
            }
            Err(e) => {
                entries.remove(id);
                error!(error = %e, "marker activation failed");
                self.surface.notify(Notice::warning(e.to_string()));
                ActivationOutcome::Failed(e.to_string())
            }
        }
    }

    async fn lookup(&self, id: &str) -> DomainResult<AnnotationDocument> {
        let detail = self.resolver.resolve(id).await?;
        self.annotations.fetch_summary(&detail.taxon_name).await
    }
}
