//! LINE push-message delivery.
//!
//! Sends the composed alert text to a single LINE user through the
//! Messaging API push endpoint. Delivery failures are logged and
//! reported to the caller as `false`, they never abort a check run.

use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::config::Credentials;
use crate::error::AppError;

/// Body of `POST /v2/bot/message/push`.
#[derive(Debug, Serialize)]
pub struct PushRequest<'a> {
    pub to: &'a str,
    pub messages: Vec<TextMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TextMessage<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: &'a str,
}

impl<'a> PushRequest<'a> {
    pub fn text(to: &'a str, text: &'a str) -> Self {
        Self {
            to,
            messages: vec![TextMessage { kind: "text", text }],
        }
    }
}

#[derive(Clone)]
pub struct LineNotifier {
    endpoint: String,
    http: Client,
}

impl LineNotifier {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            http: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Push `text` and log the outcome. Returns whether LINE accepted it.
    pub async fn notify(&self, text: &str, credentials: Credentials<'_>) -> bool {
        match self.push(text, credentials).await {
            Ok(()) => {
                tracing::info!("LINE notification sent");
                true
            }
            Err(err) => {
                tracing::error!("LINE notification failed: {}", err);
                false
            }
        }
    }

    /// Single push attempt. Only HTTP 200 counts as success.
    pub async fn push(&self, text: &str, credentials: Credentials<'_>) -> Result<(), AppError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(credentials.token)
            .json(&PushRequest::text(credentials.recipient, text))
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Network(format!(
                "LINE returned HTTP {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
