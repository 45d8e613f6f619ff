use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, USER_AGENT};
use reqwest::Client;

use crate::error::AppError;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/142.0.4472.124 Safari/537.36";
const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Fetches the resale page while presenting itself as a desktop browser.
///
/// No timeout is set: a hung connection blocks the run that issued it,
/// but never the scheduler.
#[derive(Clone)]
pub struct PageFetcher {
    http: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self, AppError> {
        let http = Client::builder()
            .default_headers(browser_headers())
            .build()?;
        Ok(Self { http })
    }

    /// GET `url` and return the body text. Any non-2xx status is a
    /// `Network` error.
    pub async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "Page returned HTTP {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        tracing::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    // Accept-Encoding (gzip, br, deflate) is added by reqwest itself so
    // that it also decodes the response.
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{header, headers, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    // wiremock splits request header values on commas.
    fn comma_values(value: &str) -> Vec<&str> {
        value.split(',').map(str::trim).collect()
    }

    #[tokio::test]
    async fn fetch_sends_browser_headers_and_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wbc2026"))
            .and(headers("user-agent", comma_values(BROWSER_USER_AGENT)))
            .and(headers("accept", comma_values(BROWSER_ACCEPT)))
            .and(headers("accept-language", vec!["en-US", "en;q=0.9"]))
            .and(headers("accept-encoding", vec!["gzip", "br", "deflate"]))
            .and(header("connection", "keep-alive"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let body = fetcher
            .fetch(&format!("{}/wbc2026", server.uri()))
            .await
            .unwrap();

        assert_eq!(body, "<html></html>");
    }

    #[tokio::test]
    async fn fetch_non_success_status_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let err = fetcher.fetch(&server.uri()).await.unwrap_err();

        match err {
            AppError::Network(msg) => assert!(msg.contains("403")),
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fetch_connection_failure_is_network_error() {
        let fetcher = PageFetcher::new().unwrap();
        // Port 9 (discard) on localhost is expected to refuse connections.
        let err = fetcher.fetch("http://127.0.0.1:9/").await.unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
    }
}
