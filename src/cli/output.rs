//! Table output formatting for CLI commands using comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::{Marker, Notice, NoticeLevel, TaxonCount};
use crate::services::CacheStatus;

/// Table formatter for CLI output
pub struct TableFormatter {
    use_colors: bool,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn format_markers(&self, markers: &[Marker]) -> String {
        let mut table = create_base_table();
        table.set_header(header(&["ID", "Taxon", "Latitude", "Longitude", "Zoom"]));

        for marker in markers {
            table.add_row(vec![
                Cell::new(&marker.id),
                Cell::new(truncate_text(&marker.taxon, 40)),
                Cell::new(format!("{:.4}", marker.position.lat)),
                Cell::new(format!("{:.4}", marker.position.lng)),
                Cell::new(format!("{}-{}", marker.min_zoom, marker.max_zoom)),
            ]);
        }

        table.to_string()
    }

    pub fn format_taxa(&self, taxa: &[&TaxonCount]) -> String {
        let mut table = create_base_table();
        table.set_header(header(&["Taxon", "Sites"]));

        for entry in taxa {
            table.add_row(vec![
                Cell::new(&entry.taxon_name),
                Cell::new(entry.count),
            ]);
        }

        table.to_string()
    }

    pub fn format_cache_status(&self, status: &CacheStatus) -> String {
        match status {
            CacheStatus::Empty => "No snapshot cached.".to_string(),
            CacheStatus::Corrupt => "Snapshot is unreadable and will be refetched.".to_string(),
            CacheStatus::Present {
                sites,
                age_secs,
                fresh,
            } => {
                let mut table = create_base_table();
                let validity = if *fresh { "valid" } else { "expired" };
                let validity_cell = if self.use_colors {
                    Cell::new(validity).fg(if *fresh { Color::Green } else { Color::Yellow })
                } else {
                    Cell::new(validity)
                };
                table.set_header(header(&["Sites", "Age", "State"]));
                table.add_row(vec![
                    Cell::new(sites),
                    Cell::new(format_age(*age_secs)),
                    validity_cell,
                ]);
                table.to_string()
            }
        }
    }

    pub fn format_notice(&self, notice: &Notice) -> String {
        let label = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        format!("[{label}] {}", notice.message)
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn create_base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|title| Cell::new(title).add_attribute(Attribute::Bold))
        .collect()
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

fn format_age(age_secs: i64) -> String {
    let hours = age_secs / 3600;
    let minutes = (age_secs % 3600) / 60;
    format!("{hours}h {minutes:02}m")
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
