//! Common test utilities for integration tests
//!
//! Scripted port implementations and fixtures shared by the presenter,
//! filter and session tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Map;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dino_finder::domain::models::{DetailRecord, DigSiteRecord, OccurrenceId};
use dino_finder::domain::ports::{AnnotationSource, DetailSource};
use dino_finder::infrastructure::surface::InMemoryMapSurface;
use dino_finder::services::{
    AnnotationFetcher, DetailResolver, FilterController, MarkerPresenter, PopupRegistry,
};
use dino_finder::{ApiError, TaxonIndex};

pub const ARTICLE_BASE: &str = "https://en.wikipedia.org/wiki";

/// Detail source answering from a fixed id -> taxon table.
pub struct ScriptedDetails {
    taxa: HashMap<String, String>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedDetails {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            taxa: entries
                .iter()
                .map(|(id, taxon)| ((*id).to_string(), (*taxon).to_string()))
                .collect(),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DetailSource for ScriptedDetails {
    async fn fetch_detail(&self, local_id: &str) -> Result<DetailRecord, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        let taxon = self
            .taxa
            .get(local_id)
            .ok_or_else(|| ApiError::NotFound(format!("occurrence {local_id}")))?;
        Ok(DetailRecord {
            occurrence_id: OccurrenceId::new(format!("occ:{local_id}")),
            taxon_name: taxon.clone(),
            collection_id: None,
            identified_name: None,
            rank: None,
            taxon_id: None,
            early_interval: None,
            early_age: None,
            late_age: None,
            reference_id: None,
            extra: Map::new(),
        })
    }
}

/// Annotation source serving a page per known title and 404 otherwise.
pub struct ScriptedPages {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedPages {
    pub fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(title, html)| ((*title).to_string(), (*html).to_string()))
                .collect(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnnotationSource for ScriptedPages {
    async fn fetch_page(&self, title: &str) -> Result<String, ApiError> {
        self.requested.lock().unwrap().push(title.to_string());
        self.pages
            .get(title)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("page {title}")))
    }

    fn article_base(&self) -> &str {
        ARTICLE_BASE
    }
}

pub type TestPresenter = MarkerPresenter<ScriptedDetails, ScriptedPages>;
pub type TestViewer = FilterController<ScriptedDetails, ScriptedPages>;

/// A presenter wired to scripted sources and an in-memory surface.
pub struct Harness {
    pub details: Arc<ScriptedDetails>,
    pub pages: Arc<ScriptedPages>,
    pub surface: Arc<InMemoryMapSurface>,
    pub presenter: Arc<TestPresenter>,
}

impl Harness {
    pub fn new(details: ScriptedDetails, pages: ScriptedPages) -> Self {
        let details = Arc::new(details);
        let pages = Arc::new(pages);
        let surface = Arc::new(InMemoryMapSurface::new());
        let presenter = Arc::new(MarkerPresenter::new(
            Arc::new(DetailResolver::new(Arc::clone(&details))),
            Arc::new(AnnotationFetcher::new(Arc::clone(&pages))),
            Arc::new(PopupRegistry::new()),
            surface.clone(),
        ));
        Self {
            details,
            pages,
            surface,
            presenter,
        }
    }

    /// Filter controller over `records` sharing this harness' presenter.
    pub fn viewer(&self, records: Vec<DigSiteRecord>) -> TestViewer {
        let taxa = TaxonIndex::from_records(&records);
        FilterController::new(Arc::clone(&self.presenter), records, taxa)
    }
}

/// Three sites: two Triceratops and one T. rex.
pub fn sample_records() -> Vec<DigSiteRecord> {
    vec![
        DigSiteRecord::new("occ:1", 43.1, -103.2, "Triceratops horridus"),
        DigSiteRecord::new("occ:2", 46.5, -104.7, "Triceratops horridus"),
        DigSiteRecord::new("occ:3", 47.6, -106.4, "Tyrannosaurus rex"),
    ]
}

pub fn sample_details() -> ScriptedDetails {
    ScriptedDetails::new(&[
        ("1", "Triceratops horridus"),
        ("2", "Triceratops horridus"),
        ("3", "Tyrannosaurus rex"),
    ])
}

pub fn sample_pages() -> ScriptedPages {
    ScriptedPages::new(&[
        (
            "Triceratops_horridus",
            r#"<html><head><title>T</title></head><body><p>Horned <a href="./Ceratopsidae">ceratopsid</a>.</p></body></html>"#,
        ),
        (
            "Tyrannosaurus_rex",
            "<html><body><p>Large theropod.</p></body></html>",
        ),
    ])
}
