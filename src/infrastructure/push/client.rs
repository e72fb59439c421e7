//! # Push Client
//!
//! Thin HTTP client for the push notification endpoint.
//!
//! Messages are posted as JSON with the server key in the `Authorization`
//! header (`key=<apiKey>`). The endpoint's response body is only logged.
//!
//! # Examples
//!
//! ```ignore
//! use product_catalog::infrastructure::push::{Message, Notification, PushClient};
//!
//! let client = PushClient::new("server-key", "https://fcm.googleapis.com/fcm/send", 5000)?;
//! let message = Message::new("device-token", Notification::new("PRODUCT_LISTED"));
//! client.send(&message).await?;
//! ```

use crate::infrastructure::push::error::{PushError, PushResult};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

const JSON_UTF8: &str = "application/json;charset=utf-8";

/// Notification body of a push message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Notification {
    /// Localization key of the body text.
    pub body_loc_key: String,
    /// Arguments substituted into the localized body.
    pub body_loc_args: Vec<String>,
    /// Badge count shown by the client.
    pub badge: i32,
}

impl Notification {
    /// Creates a notification with a localization key.
    #[must_use]
    pub fn new(body_loc_key: impl Into<String>) -> Self {
        Self {
            body_loc_key: body_loc_key.into(),
            ..Default::default()
        }
    }

    /// Sets the localization arguments.
    #[must_use]
    pub fn with_args<S: Into<String>>(mut self, args: impl IntoIterator<Item = S>) -> Self {
        self.body_loc_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the badge count.
    #[must_use]
    pub fn with_badge(mut self, badge: i32) -> Self {
        self.badge = badge;
        self
    }
}

/// A push message addressed to one device or topic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    /// Registration token or topic.
    pub to: String,
    /// Free-form data payload.
    pub data: HashMap<String, String>,
    /// Notification body.
    pub notification: Notification,
}

impl Message {
    /// Creates a message without data payload.
    #[must_use]
    pub fn new(to: impl Into<String>, notification: Notification) -> Self {
        Self {
            to: to.into(),
            data: HashMap::new(),
            notification,
        }
    }

    /// Adds one data entry.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// HTTP client for the push notification endpoint.
#[derive(Debug, Clone)]
pub struct PushClient {
    client: Client,
    url: String,
    timeout_ms: u64,
}

impl PushClient {
    /// Creates a client authorized with the given server key.
    ///
    /// # Errors
    ///
    /// Returns `PushError::Internal` if the key is not a valid header value
    /// or the client cannot be created.
    pub fn new(api_key: &str, url: impl Into<String>, timeout_ms: u64) -> PushResult<Self> {
        let mut authorization = HeaderValue::from_str(&format!("key={}", api_key))
            .map_err(|e| PushError::internal(format!("Invalid push key: {}", e)))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(headers)
            .build()
            .map_err(|e| PushError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            timeout_ms,
        })
    }

    /// Returns the endpoint URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Posts one message.
    ///
    /// # Errors
    ///
    /// Returns `PushError::Timeout` or `PushError::Connection` if the request
    /// fails, and `PushError::Rejected` for a non-success status.
    pub async fn send(&self, message: &Message) -> PushResult<()> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, JSON_UTF8)
            .json(message)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        handle_response(response).await
    }
}

async fn handle_response(response: Response) -> PushResult<()> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), body = %body, "push endpoint response");

    if status.is_success() {
        Ok(())
    } else {
        Err(PushError::rejected(status.as_u16(), body))
    }
}

fn map_reqwest_error(error: reqwest::Error) -> PushError {
    if error.is_timeout() {
        PushError::timeout("Request timed out")
    } else if error.is_connect() {
        PushError::connection(format!("Connection failed: {}", error))
    } else if error.is_builder() {
        PushError::internal(format!("Invalid request: {}", error))
    } else {
        PushError::connection(format!("HTTP request failed: {}", error))
    }
}
