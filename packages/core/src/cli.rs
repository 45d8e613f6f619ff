use clap::Parser;

/// WBC ticket watcher CLI arguments
#[derive(Debug, Default, Parser)]
#[command(
    name = "wbc-ticket-watch",
    version,
    about = "Watches the tixplus resale page and pushes LINE alerts for new listings"
)]
pub struct Cli {
    /// Run a single check and exit (same as running under CI)
    #[arg(long)]
    pub once: bool,

    /// Resale page to scrape
    #[arg(long)]
    pub target_url: Option<String>,

    /// Cron expression for daemon mode, e.g. "*/5 * * * *"
    #[arg(long)]
    pub interval: Option<String>,

    /// Minimum number of listings before an event is reported
    #[arg(long)]
    pub min_listings: Option<u64>,

    /// Substring the event name must contain
    #[arg(long)]
    pub team: Option<String>,
}
