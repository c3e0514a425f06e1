use evdash_core::config::DashboardConfig;

use crate::commands::common::{format_stats, open_dashboard};
use crate::error::CliError;

pub async fn run_stats(config: &DashboardConfig, as_json: bool) -> Result<(), CliError> {
    let dashboard = open_dashboard(config, None).await?;
    let stats = dashboard.stats();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", format_stats(&stats));
    }
    Ok(())
}
