use chrono::Utc;
use evdash_core::config::DashboardConfig;

use crate::commands::common::{
    event_to_list_item, format_event_detail, open_dashboard, parse_event_id,
};
use crate::error::CliError;

pub async fn run_show(config: &DashboardConfig, id: &str, as_json: bool) -> Result<(), CliError> {
    let event_id = parse_event_id(id)?;
    let dashboard = open_dashboard(config, None).await?;
    let event = dashboard
        .event(event_id)
        .ok_or(evdash_core::Error::NotFound(event_id))?;

    if as_json {
        let item = event_to_list_item(&event, Utc::now());
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        for line in format_event_detail(&event) {
            println!("{line}");
        }
    }
    Ok(())
}
