//! HTTP response handling

use crate::error::{Error, Result};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Response body, parsed as JSON when possible.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body was valid JSON
    Json(Value),
    /// Anything else (HTML error pages, plain text, empty bodies)
    Text(String),
}

impl ResponseBody {
    /// Parse raw body bytes, falling back to lossy UTF-8 text.
    pub fn parse(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

/// The `(status, parsed body or text)` pair returned by every endpoint call,
/// together with response headers and timing.
///
/// # Example
///
/// ```rust,no_run
/// # use petfriends::Client;
/// # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
/// let response = client.auth().get_api_key("nobody@example.com", "wrong").await?;
/// assert_eq!(response.status_code(), 403);
/// assert!(!response.contains_key("key"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: ResponseBody,
    elapsed: Duration,
}

impl ApiResponse {
    /// Create a new response from raw body bytes.
    pub fn new(status: StatusCode, headers: HeaderMap, body: &[u8], elapsed: Duration) -> Self {
        Self {
            status,
            headers,
            body: ResponseBody::parse(body),
            elapsed,
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the status code as a number.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Check if the response is successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the parsed body.
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// Time elapsed for the request/response cycle.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Body rendered as text (JSON bodies are re-serialized).
    pub fn text(&self) -> String {
        match &self.body {
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Text(text) => text.clone(),
        }
    }

    /// Look up a top-level field of a JSON object body.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => value.get(key),
            ResponseBody::Text(_) => None,
        }
    }

    /// Whether the body is a JSON object with the given top-level field.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether the body mentions `needle`: a top-level key of a JSON object,
    /// or a substring of a text body such as an HTML error page.
    pub fn mentions(&self, needle: &str) -> bool {
        match &self.body {
            ResponseBody::Json(value) => value.get(needle).is_some(),
            ResponseBody::Text(text) => text.contains(needle),
        }
    }

    /// Deserialize the JSON body regardless of status.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.body {
            ResponseBody::Json(value) => Ok(serde_json::from_value(value.clone())?),
            ResponseBody::Text(text) => Err(Error::ResponseValidation(format!(
                "expected JSON body (status {}), got: {}",
                self.status_code(),
                truncate(text, 200)
            ))),
        }
    }

    /// Deserialize a successful response, converting HTTP error statuses to
    /// typed errors.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        if !self.is_success() {
            return Err(Error::from_response(self.status_code(), &self.text()));
        }
        match self.body {
            ResponseBody::Json(value) => Ok(serde_json::from_value(value)?),
            ResponseBody::Text(text) => Err(Error::ResponseValidation(format!(
                "expected JSON body, got: {}",
                truncate(&text, 200)
            ))),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
