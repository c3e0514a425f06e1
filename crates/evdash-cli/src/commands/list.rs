use chrono::Utc;
use evdash_core::config::DashboardConfig;

use crate::commands::common::{
    event_to_list_item, format_event_lines, format_stats, open_dashboard, EventListItem,
};
use crate::error::CliError;

pub async fn run_list(
    config: &DashboardConfig,
    limit: Option<u32>,
    as_json: bool,
) -> Result<(), CliError> {
    let dashboard = open_dashboard(config, limit).await?;
    let events = dashboard.ordered_events();
    let now = Utc::now();

    if as_json {
        let json_items = events
            .iter()
            .map(|event| event_to_list_item(event, now))
            .collect::<Vec<EventListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if events.is_empty() {
        println!("No events");
    } else {
        for line in format_event_lines(&events, now) {
            println!("{line}");
        }
        println!();
        println!("{}", format_stats(&dashboard.stats()));
    }

    Ok(())
}
