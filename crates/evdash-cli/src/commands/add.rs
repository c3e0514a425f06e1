use evdash_core::config::DashboardConfig;
use evdash_core::validation::DraftForm;

use crate::cli::AddArgs;
use crate::commands::common::{open_dashboard, report};
use crate::error::CliError;

pub fn add_args_to_form(args: AddArgs) -> DraftForm {
    DraftForm {
        title: Some(args.title),
        description: args.description,
        location: Some(args.location),
        start_time: Some(args.start),
        end_time: Some(args.end),
        complete: args.complete,
    }
}

pub async fn run_add(config: &DashboardConfig, args: AddArgs) -> Result<(), CliError> {
    let draft = add_args_to_form(args).into_draft()?;
    let dashboard = open_dashboard(config, None).await?;

    let event = dashboard.create_new(draft).await?;
    report(&dashboard);
    println!("{}", event.event_id);
    Ok(())
}
