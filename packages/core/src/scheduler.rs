//! Check scheduling.
//!
//! Runs the ticket check either once (CI / `--once`) or as a daemon that
//! checks immediately and then on every fire time of the configured cron
//! expression. Daemon ticks are spawned as independent tasks: a slow run
//! is never cancelled and may overlap the next one.

use std::collections::BTreeSet;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use cron::Schedule;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio::time;

use crate::alerts::LineNotifier;
use crate::config::Config;
use crate::error::AppError;
use crate::pipeline::{check_tickets_and_notify, RunOutcome};
use crate::services::PageFetcher;

/// How the process drives the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Single run, exit status reflects the result.
    OneShot,
    /// Run now, then on every schedule tick until Ctrl+C.
    Daemon,
}

impl RunMode {
    /// One-shot when forced by the CLI or when `CI` / `GITHUB_ACTIONS`
    /// is set to a non-empty value.
    pub fn select<F>(force_once: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let in_ci = ["CI", "GITHUB_ACTIONS"]
            .iter()
            .any(|key| lookup(key).is_some_and(|v| !v.is_empty()));

        if force_once || in_ci {
            RunMode::OneShot
        } else {
            RunMode::Daemon
        }
    }
}

/// Everything a check run needs, cheap to clone into spawned tasks.
#[derive(Clone)]
pub struct Checker {
    pub config: Arc<Config>,
    pub fetcher: PageFetcher,
    pub notifier: LineNotifier,
}

impl Checker {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let notifier = LineNotifier::new(config.push_endpoint.clone());
        Ok(Self {
            config: Arc::new(config),
            fetcher: PageFetcher::new()?,
            notifier,
        })
    }

    pub async fn check(&self) -> Result<RunOutcome, AppError> {
        check_tickets_and_notify(&self.config, &self.fetcher, &self.notifier).await
    }
}

const WEEKDAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// Parse a cron expression.
///
/// Classic five-field expressions (minute first, weekdays `0`-`7` with
/// both `0` and `7` meaning Sunday) get a leading `0` seconds field and
/// their weekday field renumbered for the `cron` crate, which counts
/// Sunday as `1`. Six and seven field expressions use `cron` syntax as is.
pub fn parse_schedule(expr: &str) -> Result<Schedule, AppError> {
    let invalid = |reason: String| {
        AppError::Schedule(format!("invalid cron expression {:?}: {}", expr, reason))
    };

    let fields: Vec<&str> = expr.split_whitespace().collect();
    let normalised = if fields.len() == 5 {
        let weekdays = renumber_weekdays(fields[4]).map_err(invalid)?;
        format!("0 {} {} {} {} {}", fields[0], fields[1], fields[2], fields[3], weekdays)
    } else {
        fields.join(" ")
    };

    Schedule::from_str(&normalised).map_err(|err| invalid(err.to_string()))
}

/// Rewrite a classic weekday field as an explicit `cron` crate day list.
fn renumber_weekdays(field: &str) -> Result<String, String> {
    if field == "*" || field == "?" {
        return Ok(field.to_string());
    }

    let mut days = BTreeSet::new();
    for part in field.split(',') {
        let (range, step) = match part.split_once('/') {
            Some((range, step)) => {
                let step = step
                    .parse::<usize>()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| format!("bad weekday step {:?}", step))?;
                (range, step)
            }
            None => (part, 1),
        };

        let (lo, hi) = if range == "*" {
            (0, 6)
        } else if let Some((lo, hi)) = range.split_once('-') {
            (parse_weekday(lo)?, parse_weekday(hi)?)
        } else {
            let day = parse_weekday(range)?;
            if part.contains('/') { (day, 6) } else { (day, day) }
        };

        if lo > hi {
            return Err(format!("weekday range {:?} runs backwards", range));
        }
        for day in (lo..=hi).step_by(step) {
            days.insert(day % 7);
        }
    }

    Ok(days
        .iter()
        .map(|day| (day + 1).to_string())
        .collect::<Vec<_>>()
        .join(","))
}

fn parse_weekday(token: &str) -> Result<u32, String> {
    if let Ok(day) = token.parse::<u32>() {
        return if day <= 7 {
            Ok(day)
        } else {
            Err(format!("weekday {} out of range 0-7", day))
        };
    }

    WEEKDAY_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(token))
        .map(|i| i as u32)
        .ok_or_else(|| format!("unknown weekday {:?}", token))
}

/// Time to wait from `now` until the next fire time, if any remains.
///
/// Fire times are computed in the zone of `now`; the daemon passes
/// `Local::now()` so expressions follow the host clock.
pub fn next_delay<Tz: TimeZone>(schedule: &Schedule, now: DateTime<Tz>) -> Option<Duration> {
    let next = schedule.after(&now).next()?;
    Some((next - now).to_std().unwrap_or(Duration::ZERO))
}

/// Run a single check and map the result to a process exit code.
pub async fn run_once(checker: &Checker) -> i32 {
    tracing::info!("Running in one-shot mode");

    match checker.check().await {
        Ok(outcome) => {
            tracing::info!("Check finished: {:?}", outcome);
            0
        }
        Err(err) => {
            tracing::error!("Check failed: {}", err);
            1
        }
    }
}

/// Spawn one check as its own task. Errors are logged inside the task.
pub fn spawn_check(checker: &Checker) -> JoinHandle<()> {
    let checker = checker.clone();
    tokio::spawn(async move {
        match checker.check().await {
            Ok(outcome) => tracing::debug!("Check finished: {:?}", outcome),
            Err(err) => tracing::error!("Check failed, waiting for next tick: {}", err),
        }
    })
}

/// Run the daemon loop until `shutdown` resolves (`main` passes Ctrl+C).
///
/// In-flight checks are left to finish on their own; they are not awaited
/// on shutdown.
pub async fn run_daemon<F>(checker: Checker, schedule: Schedule, shutdown: F)
where
    F: Future<Output = ()>,
{
    tracing::info!(
        "Ticket watcher started (schedule: {})",
        checker.config.check_interval
    );

    tokio::pin!(shutdown);
    spawn_check(&checker);

    loop {
        let Some(delay) = next_delay(&schedule, Local::now()) else {
            tracing::warn!("Schedule has no upcoming fire times. Stopping.");
            break;
        };

        tokio::select! {
            _ = time::sleep(delay) => {
                spawn_check(&checker);
            }

            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received. Stopping checks.");
                break;
            }
        }
    }

    tracing::info!("Ticket watcher stopped cleanly");
}

/// Resolves on the first Ctrl+C (SIGINT).
pub async fn ctrl_c() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!("Unable to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}
