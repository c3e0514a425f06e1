use evdash_core::config::DashboardConfig;
use evdash_core::Error;

use crate::cli::EditFields;
use crate::commands::common::{
    edit_fields_to_patch, format_event_detail, open_dashboard, parse_event_id, report,
};
use crate::error::CliError;

pub async fn run_edit(
    config: &DashboardConfig,
    id: &str,
    fields: EditFields,
    partial: bool,
) -> Result<(), CliError> {
    let event_id = parse_event_id(id)?;
    let patch = edit_fields_to_patch(fields)?;
    let dashboard = open_dashboard(config, None).await?;

    let updated = if partial {
        dashboard.apply_patch(event_id, patch).await?
    } else {
        let current = dashboard
            .event(event_id)
            .ok_or(Error::NotFound(event_id))?;
        let draft = patch.apply_to(current.to_draft());
        dashboard.save_edit(event_id, draft).await?
    };

    report(&dashboard);
    for line in format_event_detail(&updated) {
        println!("{line}");
    }
    Ok(())
}
