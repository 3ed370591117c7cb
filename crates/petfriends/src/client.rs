//! Main client implementation for the PetFriends API

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use url::Url;

use crate::{
    DEFAULT_BASE_URL,
    config::{ClientConfig, Credentials},
    error::{Error, Result},
    http::RequestBuilder,
    resources::{Auth, Pets},
    types::AuthKey,
};

/// Client for the PetFriends REST API.
///
/// Cloning is cheap; clones share the underlying connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use petfriends::{Client, PetFilter};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::builder()
///     .credentials("me@example.com", "secret")
///     .build()?;
///
/// let key = client.login().await?;
/// let response = client.pets().list(&key, PetFilter::MyPets).await?;
/// println!("{}: {}", response.status_code(), response.text());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    default_headers: http::HeaderMap,
    credentials: Option<Credentials>,

    auth: OnceLock<Auth>,
    pets: OnceLock<Pets>,
}

impl Client {
    /// Create a client for the public PetFriends service with default settings.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be initialised. Use
    /// [`Client::try_new()`] for fallible construction.
    pub fn new() -> Self {
        Self::try_new().expect("Failed to build client with default configuration")
    }

    /// Create a client with default settings (fallible version).
    pub fn try_new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from environment configuration.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Create a client from a configuration object.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let base_url = validate_base_url(config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let timeout = config.timeout_or_default();

        let mut http_builder = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("petfriends-rs/", env!("CARGO_PKG_VERSION")));

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| Error::HttpClient(format!("Invalid proxy '{}': {}", proxy, e)))?;
            http_builder = http_builder.proxy(proxy);
        }

        let http_client = http_builder
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        tracing::debug!(base_url = %base_url, timeout_ms = timeout.as_millis(), "PetFriends client configured");

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                timeout,
                default_headers: config.default_headers,
                credentials: config.credentials,
                auth: OnceLock::new(),
                pets: OnceLock::new(),
            }),
        })
    }

    /// Access the authentication endpoint.
    pub fn auth(&self) -> &Auth {
        self.inner.auth.get_or_init(|| Auth::new(self.clone()))
    }

    /// Access the pet endpoints.
    pub fn pets(&self) -> &Pets {
        self.inner.pets.get_or_init(|| Pets::new(self.clone()))
    }

    /// Obtain an API key with the configured credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] if no credentials were configured, or
    /// a status-mapped error if the service refuses them.
    pub async fn login(&self) -> Result<AuthKey> {
        let credentials = self.inner.credentials.as_ref().ok_or_else(|| {
            Error::MissingConfig(
                "No credentials configured. Set PETFRIENDS_EMAIL and PETFRIENDS_PASSWORD or provide them explicitly.".to_string(),
            )
        })?;
        self.auth().login(credentials).await
    }

    /// Configured credentials, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.inner.credentials.as_ref()
    }

    /// Get the base URL for the API.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Create a request builder for a path relative to the base URL.
    pub(crate) fn request(&self, method: http::Method, path: &str) -> Result<RequestBuilder> {
        let url = self.inner.base_url.join(path).map_err(|e| {
            Error::InvalidUrl(format!(
                "Failed to construct URL from path '{}': {}",
                path, e
            ))
        })?;

        Ok(RequestBuilder::new(method, url)
            .with_client(self.inner.http_client.clone())
            .timeout(self.inner.timeout)
            .headers_from(&self.inner.default_headers))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .field("credentials", &self.inner.credentials)
            .finish()
    }
}

/// Reject empty and non-HTTP(S) URLs; make sure the path ends with `/` so
/// relative endpoint paths are appended rather than replacing the last segment.
fn validate_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl("Base URL is empty".to_string()));
    }

    let mut url = Url::parse(trimmed)
        .map_err(|e| Error::InvalidUrl(format!("'{}': {}", trimmed, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!(
            "Unsupported scheme '{}' (expected http or https)",
            url.scheme()
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Builder for creating a configured Client.
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Set the base URL for the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the credentials used by [`Client::login`].
    pub fn credentials(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.credentials = Some(Credentials::new(email, password));
        self
    }

    /// Set the timeout for requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the HTTP proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy.into());
        self
    }

    /// Add a custom default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| Error::InvalidHeaderValue(format!("for '{}'", key)))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Overlay another configuration on top of what has been set so far.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = self.config.merge(config);
        self
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        Client::from_config(self.config)
    }
}
