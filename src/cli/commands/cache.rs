use anyhow::{Context, Result};
use chrono::Duration;
use std::sync::Arc;

use crate::cli::output::TableFormatter;
use crate::cli::types::CacheCommands;
use crate::domain::models::Config;
use crate::infrastructure::storage::FileSnapshotStore;
use crate::services::LocalCache;

/// Handle cache subcommands
pub async fn execute(config: &Config, command: CacheCommands, json: bool) -> Result<()> {
    let cache = LocalCache::new(Arc::new(FileSnapshotStore::new(&config.cache.path)))
        .with_ttl(Duration::hours(i64::from(config.cache.ttl_hours)));

    match command {
        CacheCommands::Status => {
            let status = cache
                .status()
                .await
                .context("Failed to read snapshot cache")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("Snapshot: {}", config.cache.path.display());
                println!("{}", TableFormatter::new().format_cache_status(&status));
            }
        }
        CacheCommands::Clear => {
            cache
                .clear()
                .await
                .context("Failed to clear snapshot cache")?;
            if json {
                println!("{}", serde_json::json!({ "cleared": true }));
            } else {
                println!("Snapshot cache cleared.");
            }
        }
    }

    Ok(())
}
