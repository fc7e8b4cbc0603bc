use anyhow::Result;

use crate::application::ViewerSession;
use crate::cli::output::TableFormatter;
use crate::domain::models::Config;

use super::print_notices;

/// Handle the taxa command
pub async fn execute(config: &Config, search: Option<String>, json: bool) -> Result<()> {
    let session = ViewerSession::from_config(config)?;
    let (viewer, _) = session.start().await;

    let query = search.unwrap_or_default();
    let matches = viewer.search_taxa(&query);

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    print_notices(session.surface());
    if matches.is_empty() {
        println!("No taxa found.");
        return Ok(());
    }

    println!("{}", TableFormatter::new().format_taxa(&matches));
    println!(
        "\nShowing {} of {} taxa",
        matches.len(),
        viewer.taxa().len()
    );

    Ok(())
}
