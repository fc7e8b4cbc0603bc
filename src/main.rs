//! Dino Finder CLI entry point.

use clap::Parser;

use dino_finder::cli::{self, Cli, Commands};
use dino_finder::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli::load_config(&cli) {
        Ok(config) => config,
        Err(err) => cli::handle_error(err, cli.json),
    };

    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Sites { taxon, refresh } => {
            cli::commands::sites::execute(&config, taxon, refresh, cli.json).await
        }
        Commands::Taxa { search } => cli::commands::taxa::execute(&config, search, cli.json).await,
        Commands::Show { id, taxon } => {
            cli::commands::show::execute(&config, id, taxon, cli.json).await
        }
        Commands::Cache(command) => cli::commands::cache::execute(&config, command, cli.json).await,
    };

    if let Err(err) = result {
        cli::handle_error(err, cli.json);
    }
}
