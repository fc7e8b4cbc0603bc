//! CLI command implementations.

pub mod cache;
pub mod show;
pub mod sites;
pub mod taxa;

use crate::cli::output::TableFormatter;
use crate::infrastructure::surface::InMemoryMapSurface;

/// Print notices the session posted, so failures are visible without logs.
pub(crate) fn print_notices(surface: &InMemoryMapSurface) {
    let formatter = TableFormatter::new();
    for notice in surface.notices() {
        eprintln!("{}", formatter.format_notice(&notice));
    }
}
