use anyhow::Result;
use serde_json::json;

use crate::application::ViewerSession;
use crate::cli::output::TableFormatter;
use crate::domain::models::{Config, LatLng};
use crate::services::CatalogSource;

use super::print_notices;

/// Handle the sites command
pub async fn execute(config: &Config, taxa: Vec<String>, refresh: bool, json: bool) -> Result<()> {
    let session = ViewerSession::from_config(config)?;
    let (viewer, source) = if refresh {
        session.start_refreshed().await
    } else {
        session.start().await
    };

    for taxon in &taxa {
        viewer.toggle(taxon).await;
    }
    let markers = viewer.presenter().markers().await;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "source": source,
                "center": LatLng {
                    lat: config.map.center_lat,
                    lng: config.map.center_lng,
                },
                "total_sites": viewer.records().len(),
                "filter": viewer.filter().await,
                "markers": markers,
            }))?
        );
        return Ok(());
    }

    print_notices(session.surface());
    if markers.is_empty() {
        println!("No dig sites to show.");
        return Ok(());
    }

    println!("{}", TableFormatter::new().format_markers(&markers));
    println!(
        "\nShowing {} of {} dig sites ({})",
        markers.len(),
        viewer.records().len(),
        describe_source(source)
    );

    Ok(())
}

pub(crate) const fn describe_source(source: CatalogSource) -> &'static str {
    match source {
        CatalogSource::Cache => "cached snapshot",
        CatalogSource::Remote => "fresh from feed",
        CatalogSource::Unavailable => "feed unavailable",
    }
}
