//! Listing filter.
//!
//! Walks `props.concerts` in the page data and keeps the events whose
//! name contains the configured keyword and whose listing count reaches
//! the threshold.

use serde_json::{Map, Value};

use crate::error::AppError;
use crate::listings::types::{ListingCount, ListingRecord, PageData, UNKNOWN};

/// JSON pointer to the event array inside the page data.
pub const CONCERTS_POINTER: &str = "/props/concerts";

/// What an event must satisfy to be reported.
#[derive(Debug, Clone)]
pub struct ListingCriteria<'a> {
    /// Case-sensitive substring of the event name.
    pub name_contains: &'a str,
    pub min_listings: u64,
}

/// Select matching events, in page order.
///
/// A missing (or `null`) `props.concerts` is an empty result. Anything
/// else that is not an array is a shape error.
pub fn filter_listings(
    data: &PageData,
    criteria: &ListingCriteria<'_>,
) -> Result<Vec<ListingRecord>, AppError> {
    let items = match data.pointer(CONCERTS_POINTER) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(AppError::MalformedJson(format!(
                "props.concerts is not an array (found {})",
                kind_of(other)
            )))
        }
    };

    let records = items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|item| match_item(item, criteria))
        .collect();

    Ok(records)
}

fn match_item(item: &Map<String, Value>, criteria: &ListingCriteria<'_>) -> Option<ListingRecord> {
    let count = match item.get("listings_count")? {
        Value::Number(n) => n,
        _ => return None,
    };
    if count.as_f64()? < criteria.min_listings as f64 {
        return None;
    }

    let name = item.get("name")?.as_str().filter(|n| !n.is_empty())?;
    if !name.contains(criteria.name_contains) {
        return None;
    }

    // Zero is shown as unknown in the alert text.
    let listing_count = if count.as_f64() == Some(0.0) {
        ListingCount::Unknown
    } else {
        ListingCount::Known(count.clone())
    };

    Some(ListingRecord {
        name: name.to_string(),
        date: scalar_or_unknown(item.get("concert_date")),
        listing_count,
    })
}

fn scalar_or_unknown(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => UNKNOWN.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
