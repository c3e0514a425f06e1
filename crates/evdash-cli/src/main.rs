//! evdash - command-line client for the events dashboard
//!
//! Every command loads the collection from the backend, applies one
//! operation through the optimistic reconciler, and reports the outcome.

mod cli;
mod commands;
mod error;

#[cfg(test)]
mod tests;

use clap::Parser;
use evdash_core::config::DashboardConfig;

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::list::run_list;
use crate::commands::show::run_show;
use crate::commands::stats::run_stats;
use crate::commands::toggle::run_toggle;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("evdash=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.api_url.as_deref())?;
    tracing::debug!("Using events endpoint {}", config.events_url());

    match cli.command {
        Commands::List { limit, json } => run_list(&config, limit, json).await?,
        Commands::Show { id, json } => run_show(&config, &id, json).await?,
        Commands::Stats { json } => run_stats(&config, json).await?,
        Commands::Add(args) => run_add(&config, args).await?,
        Commands::Edit {
            id,
            fields,
            partial,
        } => run_edit(&config, &id, fields, partial).await?,
        Commands::Toggle { id } => run_toggle(&config, &id).await?,
        Commands::Delete { id } => run_delete(&config, &id).await?,
    }

    Ok(())
}

fn resolve_config(api_url: Option<&str>) -> Result<DashboardConfig, CliError> {
    let config = DashboardConfig::from_env()?;
    match api_url {
        Some(url) => Ok(config.with_api_base_url(url)?),
        None => Ok(config),
    }
}
