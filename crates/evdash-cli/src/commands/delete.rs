use evdash_core::config::DashboardConfig;

use crate::commands::common::{open_dashboard, parse_event_id, report};
use crate::error::CliError;

pub async fn run_delete(config: &DashboardConfig, id: &str) -> Result<(), CliError> {
    let event_id = parse_event_id(id)?;
    let dashboard = open_dashboard(config, None).await?;

    let removed = dashboard.delete_event(event_id).await?;
    report(&dashboard);
    println!("{}", removed.event_id);
    Ok(())
}
