//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dino-finder")]
#[command(about = "Dino Finder - fossil dig sites with paleontology and Wikipedia details", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (replaces .dino-finder/config.yaml and local.yaml)
    #[arg(short, long, global = true, env = "DINO_FINDER_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the dig-site markers that would be drawn
    Sites {
        /// Only show these taxa (repeatable; spaces or underscores)
        #[arg(short, long)]
        taxon: Vec<String>,

        /// Ignore the snapshot cache and refetch the feed
        #[arg(long)]
        refresh: bool,
    },

    /// List taxa with their dig-site counts
    Taxa {
        /// Case-insensitive substring to match taxon names against
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Activate a marker and print its popup
    Show {
        /// Local occurrence identifier (the part after `occ:`)
        id: String,

        /// Restrict markers to these taxa before activating
        #[arg(short, long)]
        taxon: Vec<String>,
    },

    /// Snapshot cache commands
    #[command(subcommand)]
    Cache(CacheCommands),
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show whether a snapshot exists and whether it is still valid
    Status,

    /// Delete the snapshot so the next run refetches the feed
    Clear,
}
