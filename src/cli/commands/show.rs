use anyhow::{bail, Result};
use serde_json::json;

use crate::application::ViewerSession;
use crate::domain::models::Config;
use crate::services::ActivationOutcome;

use super::print_notices;

/// Handle the show command: activate one marker and print its popup.
pub async fn execute(config: &Config, id: String, taxa: Vec<String>, json: bool) -> Result<()> {
    let session = ViewerSession::from_config(config)?;
    let (viewer, _) = session.start().await;

    for taxon in &taxa {
        viewer.toggle(taxon).await;
    }

    let outcome = viewer.presenter().activate(&id).await;
    let detail = viewer.presenter().resolver().cached(&id).await;
    let popup = match outcome {
        ActivationOutcome::Opened(handle) => session.surface().popup(handle),
        _ => None,
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "id": id,
                "outcome": outcome,
                "detail": detail.as_deref(),
                "popup_html": popup.as_ref().map(|p| p.html.as_str()),
                "notices": session.surface().notices(),
            }))?
        );
        return Ok(());
    }

    print_notices(session.surface());
    match outcome {
        ActivationOutcome::Opened(_) => {}
        ActivationOutcome::UnknownMarker => bail!("No marker with id {id} is on the map"),
        ActivationOutcome::Failed(reason) => bail!("Could not open popup for {id}: {reason}"),
        other => bail!("Unexpected activation outcome for {id}: {other:?}"),
    }

    if let Some(detail) = detail {
        println!("\nOccurrence Details:");
        println!("─────────────────────────────────────────");
        println!("Occurrence:  {}", detail.occurrence_id);
        println!("Taxon:       {}", detail.taxon_name);
        if let Some(ref interval) = detail.early_interval {
            println!("Interval:    {interval}");
        }
        if let (Some(early), Some(late)) = (detail.early_age, detail.late_age) {
            println!("Age:         {early} - {late} Ma");
        }
        if let Some(ref collection) = detail.collection_id {
            println!("Collection:  {collection}");
        }
    }

    if let Some(popup) = popup {
        println!("\nPopup:");
        println!("{}", popup.html);
    }

    Ok(())
}
