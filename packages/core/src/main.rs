use std::env;

use clap::Parser;
use dotenvy::dotenv;

use wbc_ticket_watch::cli::Cli;
use wbc_ticket_watch::config::Config;
use wbc_ticket_watch::logging::init_logging;
use wbc_ticket_watch::scheduler::{self, Checker, RunMode};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let config = Config::from_env()
        .map(|config| config.with_overrides(&cli))
        .unwrap_or_else(|err| {
            tracing::error!("{}", err);
            std::process::exit(1);
        });

    tracing::info!("Service started with config: {:?}", config);

    let mode = RunMode::select(cli.once, |key| env::var(key).ok());

    // Parsed in both modes so a bad CHECK_INTERVAL is always reported.
    let schedule = scheduler::parse_schedule(&config.check_interval).unwrap_or_else(|err| {
        tracing::error!("{}", err);
        std::process::exit(1);
    });

    let checker = Checker::new(config).unwrap_or_else(|err| {
        tracing::error!("{}", err);
        std::process::exit(1);
    });

    match mode {
        RunMode::OneShot => {
            let code = scheduler::run_once(&checker).await;
            std::process::exit(code);
        }
        RunMode::Daemon => scheduler::run_daemon(checker, schedule, scheduler::ctrl_c()).await,
    }
}
