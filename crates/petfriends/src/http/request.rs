//! HTTP request builder

use super::ApiResponse;
use crate::error::{Error, Result};
use crate::observability::{RequestMetadata, RequestTimer, ResponseMetadata};
use crate::types::PetPhoto;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::time::Duration;
use url::Url;

/// Request payload.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` pairs, sent in order.
    Form(Vec<(String, String)>),
    /// `multipart/form-data` parts, sent in order.
    Multipart(Vec<MultipartPart>),
}

impl RequestBody {
    fn kind(&self) -> &'static str {
        match self {
            RequestBody::Form(_) => "form",
            RequestBody::Multipart(_) => "multipart",
        }
    }
}

/// A single part of a multipart body.
#[derive(Debug, Clone)]
pub enum MultipartPart {
    /// Plain text field
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// File field carrying a photo
    File {
        /// Field name
        name: String,
        /// Photo contents and metadata
        photo: PetPhoto,
    },
}

impl MultipartPart {
    /// Text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        MultipartPart::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    /// File field.
    pub fn file(name: impl Into<String>, photo: PetPhoto) -> Self {
        MultipartPart::File {
            name: name.into(),
            photo,
        }
    }

    /// Field name of this part.
    pub fn name(&self) -> &str {
        match self {
            MultipartPart::Text { name, .. } | MultipartPart::File { name, .. } => name,
        }
    }
}

/// Builder for HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Url,
    headers: HeaderMap,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
    timeout: Duration,
    pub(crate) http_client: Option<reqwest::Client>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            timeout: crate::config::DEFAULT_TIMEOUT,
            http_client: None,
        }
    }

    /// Set the HTTP client to use
    pub(crate) fn with_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set a header, returning an error if the name or value is invalid.
    ///
    /// # Errors
    /// Returns an error if the header name or value contains invalid characters.
    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let key_str = key.as_ref();
        let value_str = value.as_ref();

        let key = key_str
            .parse::<HeaderName>()
            .map_err(|e| Error::InvalidHeaderName(format!("'{}': {}", key_str, e)))?;
        let value = value_str
            .parse::<HeaderValue>()
            .map_err(|e| Error::InvalidHeaderValue(format!("for '{}': {}", key, e)))?;

        self.headers.insert(key, value);
        Ok(self)
    }

    /// Add all headers from a map, overwriting existing ones.
    pub fn headers_from(mut self, headers: &HeaderMap) -> Self {
        for (key, value) in headers {
            self.headers.insert(key.clone(), value.clone());
        }
        self
    }

    /// Append a query parameter. Empty values are kept (`?filter=`).
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Send a form-encoded body.
    pub fn form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let pairs = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.body = Some(RequestBody::Form(pairs));
        self
    }

    /// Send a multipart body.
    pub fn multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = Some(RequestBody::Multipart(parts));
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send the request once and capture whatever the service returns.
    ///
    /// Non-2xx statuses are not errors here; only transport failures are.
    pub async fn send(self) -> Result<ApiResponse> {
        let client = self
            .http_client
            .ok_or_else(|| Error::HttpClient("No HTTP client configured".to_string()))?;

        let mut metadata = RequestMetadata::new(self.method.as_str(), self.url.path());
        if let Some(body) = &self.body {
            metadata = metadata.with_body_kind(body.kind());
        }

        let mut req = client
            .request(self.method, self.url)
            .timeout(self.timeout)
            .headers(self.headers);

        if !self.query.is_empty() {
            req = req.query(&self.query);
        }

        req = match self.body {
            None => req,
            Some(RequestBody::Form(pairs)) => req.form(&pairs),
            Some(RequestBody::Multipart(parts)) => req.multipart(multipart_form(parts)?),
        };

        metadata.log_request();
        let timer = RequestTimer::start();

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let error = transport_error(e, self.timeout);
                metadata.log_failure(timer.elapsed(), &error.to_string());
                return Err(error);
            }
        };

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let error = transport_error(e, self.timeout);
                metadata.log_failure(timer.elapsed(), &error.to_string());
                return Err(error);
            }
        };

        let elapsed = timer.elapsed();
        let response_metadata =
            ResponseMetadata::new(status.as_u16(), elapsed).with_body_size(body.len());
        if status.is_success() {
            response_metadata.log_success(&metadata);
        } else {
            response_metadata
                .log_error(&metadata, status.canonical_reason().unwrap_or("unknown status"));
        }

        Ok(ApiResponse::new(status, headers, &body, elapsed))
    }

    /// Get the method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the query parameters.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Get the body.
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// Get the timeout.
    pub fn timeout_duration(&self) -> Duration {
        self.timeout
    }
}

fn multipart_form(parts: Vec<MultipartPart>) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part {
            MultipartPart::Text { name, value } => form.text(name, value),
            MultipartPart::File { name, photo } => {
                let file_part = reqwest::multipart::Part::bytes(photo.bytes().to_vec())
                    .file_name(photo.file_name().to_string())
                    .mime_str(photo.mime_type())
                    .map_err(|e| {
                        Error::InvalidRequest(format!(
                            "invalid MIME type '{}': {}",
                            photo.mime_type(),
                            e
                        ))
                    })?;
                form.part(name, file_part)
            }
        };
    }
    Ok(form)
}

/// Map a `reqwest` failure, from sending or from reading the body.
fn transport_error(e: reqwest::Error, timeout: Duration) -> Error {
    if e.is_timeout() {
        Error::Timeout(timeout)
    } else if e.is_builder() {
        Error::HttpClient(e.to_string())
    } else {
        Error::Connection(e.to_string())
    }
}
