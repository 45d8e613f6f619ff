use thiserror::Error;

/// Unified application error.
///
/// Every stage of a check run (config, fetch, extraction, scheduling)
/// fails through this type so the top-level handler can log it and
/// decide on the exit status.
#[derive(Error, Debug)]
pub enum AppError {
    /// A credential needed for a run is not set.
    #[error("Missing configuration: {0}")]
    ConfigMissing(String),

    /// A configuration value is present but unusable.
    #[error("Config error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    /// The page carries no `data-page` attribute.
    #[error("No data-page attribute found (page layout changed or login required)")]
    MissingDataAttribute,

    #[error("Malformed page data: {0}")]
    MalformedJson(String),

    #[error("Schedule error: {0}")]
    Schedule(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedJson(err.to_string())
    }
}
