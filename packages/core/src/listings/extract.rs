//! Page-data extraction.
//!
//! The resale page hydrates its client-side app from a single element
//! carrying a `data-page` attribute whose value is percent-encoded JSON.

use scraper::{Html, Selector};

use crate::error::AppError;
use crate::listings::types::PageData;

pub const DATA_ATTRIBUTE: &str = "data-page";

/// Locate the first `data-page` element in `html`, percent-decode its
/// value and parse it as JSON.
///
/// A page without the attribute (or with an empty one) yields
/// [`AppError::MissingDataAttribute`]; callers treat that as "nothing to
/// report" rather than a failure.
pub fn extract_page_data(html: &str) -> Result<PageData, AppError> {
    let encoded = find_data_attribute(html)?.ok_or(AppError::MissingDataAttribute)?;

    let decoded = urlencoding::decode(&encoded)
        .map_err(|err| AppError::MalformedJson(format!("invalid percent-encoding: {}", err)))?;

    let data = serde_json::from_str(&decoded)?;
    Ok(data)
}

fn find_data_attribute(html: &str) -> Result<Option<String>, AppError> {
    let selector = Selector::parse(&format!("[{}]", DATA_ATTRIBUTE))
        .map_err(|err| AppError::Config(format!("bad selector: {:?}", err)))?;

    let document = Html::parse_document(html);
    let value = document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr(DATA_ATTRIBUTE))
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_with(attr: &str) -> String {
        format!(
            r#"<!DOCTYPE html><html><head><title>t</title></head>
            <body><div id="app" data-page="{}"></div></body></html>"#,
            attr
        )
    }

    #[test]
    fn extracts_and_decodes_percent_encoded_json() {
        let payload = r#"{"props":{"concerts":[{"name":"A","listings_count":2}]}}"#;
        let html = page_with(&urlencoding::encode(payload));

        let data = extract_page_data(&html).unwrap();

        assert_eq!(data["props"]["concerts"][0]["name"], json!("A"));
        assert_eq!(data["props"]["concerts"][0]["listings_count"], json!(2));
    }

    #[test]
    fn decodes_non_ascii_names() {
        let payload = r#"{"props":{"concerts":[{"name":"チャイニーズ・タイペイ vs 日本"}]}}"#;
        let html = page_with(&urlencoding::encode(payload));

        let data = extract_page_data(&html).unwrap();

        assert_eq!(
            data["props"]["concerts"][0]["name"],
            json!("チャイニーズ・タイペイ vs 日本")
        );
    }

    #[test]
    fn html_entity_encoded_attribute_is_unescaped_before_parsing() {
        let html = page_with(r#"{&quot;props&quot;:{}}"#);
        let data = extract_page_data(&html).unwrap();
        assert_eq!(data, json!({"props": {}}));
    }

    #[test]
    fn first_matching_element_wins() {
        let html = r#"<html><body>
            <div data-page="%7B%22n%22%3A1%7D"></div>
            <div data-page="%7B%22n%22%3A2%7D"></div>
        </body></html>"#;

        let data = extract_page_data(html).unwrap();
        assert_eq!(data, json!({"n": 1}));
    }

    #[test]
    fn page_without_attribute_is_missing_data_attribute() {
        let html = "<html><body><div id=\"app\"></div></body></html>";
        assert!(matches!(
            extract_page_data(html),
            Err(AppError::MissingDataAttribute)
        ));
    }

    #[test]
    fn empty_attribute_is_missing_data_attribute() {
        assert!(matches!(
            extract_page_data(&page_with("")),
            Err(AppError::MissingDataAttribute)
        ));
    }

    #[test]
    fn garbage_payload_is_malformed_json() {
        let html = page_with("%7Bnot-json");
        assert!(matches!(
            extract_page_data(&html),
            Err(AppError::MalformedJson(_))
        ));
    }
}
