//! Data types shared by the listing stages.

use std::fmt;

use serde_json::Number;

/// Decoded `data-page` payload. Its shape belongs to the source site and
/// is only read along one path, see [`crate::listings::filter`].
pub type PageData = serde_json::Value;

/// Placeholder for fields the page did not provide.
pub const UNKNOWN: &str = "unknown";

/// One event that passed the filter, built fresh on every run.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    pub name: String,
    pub date: String,
    pub listing_count: ListingCount,
}

/// Number of resale listings for an event.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingCount {
    Known(Number),
    Unknown,
}

impl fmt::Display for ListingCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingCount::Known(n) => write!(f, "{}", n),
            ListingCount::Unknown => f.write_str(UNKNOWN),
        }
    }
}
