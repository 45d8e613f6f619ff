use std::env;

use crate::cli::Cli;
use crate::error::AppError;

pub const DEFAULT_TARGET_URL: &str = "https://tradead.tixplus.jp/wbc2026";
pub const DEFAULT_CHECK_INTERVAL: &str = "*/5 * * * *";
pub const DEFAULT_MIN_LISTINGS: u64 = 1;
pub const DEFAULT_TEAM_KEYWORD: &str = "チャイニーズ・タイペイ";
pub const DEFAULT_PUSH_ENDPOINT: &str = "https://api.line.me/v2/bot/message/push";

/// Process-wide settings, built once at startup and never mutated.
///
/// Credentials are optional here: a missing token or recipient is not a
/// startup failure, each check run reports it and skips all HTTP work.
#[derive(Clone)]
pub struct Config {
    pub channel_access_token: Option<String>,
    pub user_id: Option<String>,
    pub target_url: String,
    pub check_interval: String,
    pub min_listings: u64,
    pub team_keyword: String,
    pub push_endpoint: String,
}

/// Borrowed view of the two credentials once both are known to be present.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub token: &'a str,
    pub recipient: &'a str,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let min_listings = match get("NUMBER_OF_REMINDERS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::Config(format!(
                    "NUMBER_OF_REMINDERS must be a non-negative integer, got {:?}",
                    raw
                ))
            })?,
            None => DEFAULT_MIN_LISTINGS,
        };

        Ok(Self {
            channel_access_token: get("CHANNEL_ACCESS_TOKEN"),
            user_id: get("USER_ID"),
            target_url: get("TARGET_URL").unwrap_or_else(|| DEFAULT_TARGET_URL.to_string()),
            check_interval: get("CHECK_INTERVAL")
                .unwrap_or_else(|| DEFAULT_CHECK_INTERVAL.to_string()),
            min_listings,
            team_keyword: get("TEAM_KEYWORD")
                .unwrap_or_else(|| DEFAULT_TEAM_KEYWORD.to_string()),
            push_endpoint: get("LINE_PUSH_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_PUSH_ENDPOINT.to_string()),
        })
    }

    /// Apply command-line overrides on top of the environment values.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.target_url {
            self.target_url = url.clone();
        }
        if let Some(interval) = &cli.interval {
            self.check_interval = interval.clone();
        }
        if let Some(min) = cli.min_listings {
            self.min_listings = min;
        }
        if let Some(team) = &cli.team {
            self.team_keyword = team.clone();
        }
        self
    }

    /// Both credentials, or `ConfigMissing` naming what is absent.
    pub fn credentials(&self) -> Result<Credentials<'_>, AppError> {
        match (self.channel_access_token.as_deref(), self.user_id.as_deref()) {
            (Some(token), Some(recipient)) => Ok(Credentials { token, recipient }),
            (None, None) => Err(AppError::ConfigMissing(
                "CHANNEL_ACCESS_TOKEN and USER_ID are not set".into(),
            )),
            (None, _) => Err(AppError::ConfigMissing("CHANNEL_ACCESS_TOKEN is not set".into())),
            (_, None) => Err(AppError::ConfigMissing("USER_ID is not set".into())),
        }
    }
}

// Keeps the access token out of log lines.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "channel_access_token",
                &self.channel_access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("user_id", &self.user_id)
            .field("target_url", &self.target_url)
            .field("check_interval", &self.check_interval)
            .field("min_listings", &self.min_listings)
            .field("team_keyword", &self.team_keyword)
            .field("push_endpoint", &self.push_endpoint)
            .finish()
    }
}
