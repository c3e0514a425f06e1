use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "evdash")]
#[command(about = "Manage dashboard events from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides EVDASH_API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List events, pending first
    #[command(alias = "ls")]
    List {
        /// Number of events to request
        #[arg(short, long)]
        limit: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one event
    Show {
        /// Event ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show completion counts
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new event
    #[command(alias = "new")]
    Add(AddArgs),
    /// Change fields of an existing event
    Edit {
        /// Event ID
        id: String,
        #[command(flatten)]
        fields: EditFields,
        /// Send only the changed fields instead of the full record
        #[arg(long)]
        partial: bool,
    },
    /// Flip the completion flag of an event
    Toggle {
        /// Event ID
        id: String,
    },
    /// Delete an event
    #[command(alias = "rm")]
    Delete {
        /// Event ID
        id: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub title: String,
    #[arg(short, long)]
    pub location: String,
    /// Start, e.g. 2030-06-20T09:00 (UTC) or RFC 3339
    #[arg(short, long, value_name = "TIME")]
    pub start: String,
    /// End, same formats as --start
    #[arg(short, long, value_name = "TIME")]
    pub end: String,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Create the event already completed
    #[arg(long)]
    pub complete: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct EditFields {
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub location: Option<String>,
    #[arg(short, long, value_name = "TIME")]
    pub start: Option<String>,
    #[arg(short, long, value_name = "TIME")]
    pub end: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(long, value_name = "BOOL")]
    pub complete: Option<bool>,
}
