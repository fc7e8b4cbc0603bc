//! Integration tests for marker rendering, popup toggling and filtering
//!
//! Test coverage:
//! - One popup per marker, toggled by repeated activation
//! - Several markers may have popups open at once
//! - Clicking again while a lookup is pending cancels it
//! - Lookup failures post a notice and open nothing
//! - Filter toggling restricts markers and closes hidden popups

mod common;

use common::{sample_details, sample_pages, sample_records, Harness, ScriptedDetails};
use dino_finder::domain::models::NoticeLevel;
use dino_finder::services::{ActivationOutcome, DetailState};
use std::time::Duration;

#[tokio::test]
async fn test_render_draws_one_marker_per_record() {
    let harness = Harness::new(sample_details(), sample_pages());
    let viewer = harness.viewer(sample_records());

    assert_eq!(viewer.render().await, 3);
    assert_eq!(harness.surface.marker_ids(), vec!["1", "2", "3"]);

    let markers = harness.presenter.markers().await;
    assert_eq!(markers[0].title, "1");
    assert_eq!(markers[0].min_zoom, 5);
    assert_eq!(markers[0].max_zoom, 15);
}

#[tokio::test]
async fn test_activation_toggles_popup() {
    let harness = Harness::new(sample_details(), sample_pages());
    let viewer = harness.viewer(sample_records());
    viewer.render().await;

    let ActivationOutcome::Opened(handle) = harness.presenter.activate("1").await else {
        panic!("first activation should open a popup");
    };
    let popup = harness.surface.popup(handle).expect("popup should be open");
    assert_eq!(popup.marker_id, "1");
    assert!(popup.html.starts_with(r#"<div class="body-window">"#));
    assert!(popup.html.contains(
        r#"href="https://en.wikipedia.org/wiki/Ceratopsidae" target="_blank" rel="noopener""#
    ));

    assert_eq!(harness.presenter.activate("1").await, ActivationOutcome::Closed);
    assert!(harness.surface.popups().is_empty());
    assert!(harness.presenter.popups().open_ids().await.is_empty());

    // Reopening reuses the memoized detail
    assert!(matches!(
        harness.presenter.activate("1").await,
        ActivationOutcome::Opened(_)
    ));
    assert_eq!(harness.details.calls(), 1);
}

#[tokio::test]
async fn test_independent_markers_can_both_be_open() {
    let harness = Harness::new(sample_details(), sample_pages());
    let viewer = harness.viewer(sample_records());
    viewer.render().await;

    let first = harness.presenter.activate("1").await;
    let second = harness.presenter.activate("3").await;
    assert!(matches!(first, ActivationOutcome::Opened(_)));
    assert!(matches!(second, ActivationOutcome::Opened(_)));

    assert_eq!(harness.surface.popups().len(), 2);
    assert_eq!(harness.presenter.popups().open_ids().await, vec!["1", "3"]);
}

#[tokio::test]
async fn test_click_while_pending_cancels_lookup() {
    let details = sample_details().with_delay(Duration::from_millis(100));
    let harness = Harness::new(details, sample_pages());
    let viewer = harness.viewer(sample_records());
    viewer.render().await;

    let presenter = harness.presenter.clone();
    let first = tokio::spawn(async move { presenter.activate("2").await });

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(harness.presenter.popups().is_pending("2").await);
    assert_eq!(harness.presenter.activate("2").await, ActivationOutcome::Cancelled);

    assert_eq!(first.await.unwrap(), ActivationOutcome::Superseded);
    assert!(harness.surface.popups().is_empty());
    assert!(harness.presenter.popups().handle_for("2").await.is_none());

    // The detail itself stays cached for the next click
    assert_eq!(harness.presenter.resolver().state("2"), DetailState::Cached);
}

#[tokio::test]
async fn test_failure_after_cancel_is_silent() {
    let details = ScriptedDetails::new(&[("1", "Triceratops horridus")])
        .with_delay(Duration::from_millis(100));
    let harness = Harness::new(details, sample_pages());
    let viewer = harness.viewer(sample_records());
    viewer.render().await;

    let presenter = harness.presenter.clone();
    let first = tokio::spawn(async move { presenter.activate("2").await });

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(harness.presenter.activate("2").await, ActivationOutcome::Cancelled);

    assert_eq!(first.await.unwrap(), ActivationOutcome::Superseded);
    assert!(harness.surface.notices().is_empty());
    assert!(harness.surface.popups().is_empty());
    assert!(!harness.presenter.popups().is_pending("2").await);
    assert_eq!(harness.presenter.resolver().state("2"), DetailState::Unfetched);
}

#[tokio::test]
async fn test_concurrent_activations_of_distinct_markers_share_nothing() {
    let harness = Harness::new(
        sample_details().with_delay(Duration::from_millis(30)),
        sample_pages(),
    );
    let viewer = harness.viewer(sample_records());
    viewer.render().await;

    let outcomes = futures::future::join_all(
        ["1", "2", "3"].map(|id| harness.presenter.activate(id)),
    )
    .await;

    assert!(outcomes
        .iter()
        .all(|outcome| matches!(outcome, ActivationOutcome::Opened(_))));
    assert_eq!(harness.surface.popups().len(), 3);
    assert_eq!(harness.details.calls(), 3);
}

#[tokio::test]
async fn test_detail_failure_posts_notice() {
    let details = ScriptedDetails::new(&[("1", "Triceratops horridus")]);
    let harness = Harness::new(details, sample_pages());
    let viewer = harness.viewer(sample_records());
    viewer.render().await;

    let outcome = harness.presenter.activate("3").await;
    assert!(matches!(outcome, ActivationOutcome::Failed(_)));
    assert!(harness.surface.popups().is_empty());

    let notices = harness.surface.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert!(notices[0].message.contains('3'));

    // A failed lookup leaves the marker free to retry
    assert!(!harness.presenter.popups().is_pending("3").await);
}

#[tokio::test]
async fn test_annotation_fallback_to_genus() {
    let details = ScriptedDetails::new(&[("1", "Stegosaurus stenops")]);
    let pages = common::ScriptedPages::new(&[(
        "Stegosaurus",
        "<html><body><p>Plated dinosaur.</p></body></html>",
    )]);
    let harness = Harness::new(details, pages);
    let viewer = harness.viewer(vec![dino_finder::DigSiteRecord::new(
        "occ:1",
        39.0,
        -105.0,
        "Stegosaurus stenops",
    )]);
    viewer.render().await;

    let ActivationOutcome::Opened(handle) = harness.presenter.activate("1").await else {
        panic!("fallback query should open a popup");
    };
    assert!(harness.surface.popup(handle).unwrap().html.contains("Plated"));
    assert_eq!(
        harness.pages.requested(),
        vec!["Stegosaurus_stenops", "Stegosaurus"]
    );
}

#[tokio::test]
async fn test_unknown_marker() {
    let harness = Harness::new(sample_details(), sample_pages());
    harness.viewer(sample_records()).render().await;

    assert_eq!(
        harness.presenter.activate("999").await,
        ActivationOutcome::UnknownMarker
    );
    assert_eq!(harness.details.calls(), 0);
}

#[tokio::test]
async fn test_filter_restricts_markers() {
    let harness = Harness::new(sample_details(), sample_pages());
    let viewer = harness.viewer(sample_records());
    viewer.render().await;

    assert!(viewer.toggle("Tyrannosaurus rex").await);
    assert_eq!(harness.surface.marker_ids(), vec!["3"]);

    assert!(viewer.toggle("triceratops horridus").await);
    assert_eq!(harness.surface.marker_ids(), vec!["1", "2", "3"]);

    assert!(!viewer.toggle("Tyrannosaurus rex").await);
    assert_eq!(harness.surface.marker_ids(), vec!["1", "2"]);

    // Deselecting the last taxon shows everything again
    assert!(!viewer.toggle("Triceratops horridus").await);
    assert_eq!(harness.surface.marker_ids(), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_filter_closes_popups_of_hidden_markers() {
    let harness = Harness::new(sample_details(), sample_pages());
    let viewer = harness.viewer(sample_records());
    viewer.render().await;

    assert!(matches!(
        harness.presenter.activate("3").await,
        ActivationOutcome::Opened(_)
    ));
    viewer.toggle("Triceratops horridus").await;

    assert!(harness.surface.popups().is_empty());
    assert!(harness.presenter.popups().open_ids().await.is_empty());
    assert_eq!(
        harness.presenter.activate("3").await,
        ActivationOutcome::UnknownMarker
    );

    assert_eq!(viewer.clear().await, 3);
    assert!(viewer.filter().await.is_empty());
}

#[tokio::test]
async fn test_taxon_search_is_independent_of_filter() {
    let harness = Harness::new(sample_details(), sample_pages());
    let viewer = harness.viewer(sample_records());
    viewer.toggle("Tyrannosaurus rex").await;

    let names: Vec<&str> = viewer
        .search_taxa("TRICER")
        .iter()
        .map(|entry| entry.taxon_name.as_str())
        .collect();
    assert_eq!(names, vec!["Triceratops horridus"]);
    assert_eq!(viewer.search_taxa("").len(), 2);
    assert!(viewer.search_taxa("velociraptor").is_empty());
}
