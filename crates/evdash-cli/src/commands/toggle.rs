use chrono::Utc;
use evdash_core::config::DashboardConfig;

use crate::commands::common::{format_event_lines, open_dashboard, parse_event_id, report};
use crate::error::CliError;

pub async fn run_toggle(config: &DashboardConfig, id: &str) -> Result<(), CliError> {
    let event_id = parse_event_id(id)?;
    let dashboard = open_dashboard(config, None).await?;

    let event = dashboard.toggle_complete(event_id).await?;
    report(&dashboard);
    for line in format_event_lines(&[event], Utc::now()) {
        println!("{line}");
    }
    Ok(())
}
