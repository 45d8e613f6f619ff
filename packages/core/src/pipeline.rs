//! One check run: fetch → extract → filter → format → notify.
//!
//! Nothing is remembered between runs; every call starts from the page.

use crate::alerts::LineNotifier;
use crate::config::Config;
use crate::error::AppError;
use crate::listings::{extract_page_data, filter_listings, format_message, ListingCriteria};
use crate::services::PageFetcher;

/// How a run that did not error ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Token or recipient not configured; no HTTP call was made.
    ConfigMissing,
    /// The page had no `data-page` attribute.
    NoPageData,
    /// Page parsed fine but nothing matched.
    NoListings,
    /// A message was composed and a push was attempted.
    Notified { listings: usize, delivered: bool },
}

/// Run the whole pipeline once.
///
/// Fetch failures and malformed page data are returned as errors for the
/// scheduler to handle. A failed push is logged by the notifier and only
/// shows up as `delivered: false`.
pub async fn check_tickets_and_notify(
    config: &Config,
    fetcher: &PageFetcher,
    notifier: &LineNotifier,
) -> Result<RunOutcome, AppError> {
    tracing::info!("Checking ticket listings at {}", config.target_url);

    let credentials = match config.credentials() {
        Ok(creds) => creds,
        Err(err) => {
            tracing::error!("{}. Check the .env file or environment variables.", err);
            return Ok(RunOutcome::ConfigMissing);
        }
    };

    let html = fetcher.fetch(&config.target_url).await?;

    let data = match extract_page_data(&html) {
        Ok(data) => data,
        Err(AppError::MissingDataAttribute) => {
            tracing::warn!("{}", AppError::MissingDataAttribute);
            return Ok(RunOutcome::NoPageData);
        }
        Err(err) => return Err(err),
    };

    let criteria = ListingCriteria {
        name_contains: &config.team_keyword,
        min_listings: config.min_listings,
    };
    let records = filter_listings(&data, &criteria)?;

    if records.is_empty() {
        tracing::info!("No matching listings right now");
        return Ok(RunOutcome::NoListings);
    }

    let message = format_message(&records, &config.target_url);
    tracing::info!("Found {} matching event(s):\n{}", records.len(), message);

    let delivered = notifier.notify(&message, credentials).await;

    Ok(RunOutcome::Notified {
        listings: records.len(),
        delivered,
    })
}
