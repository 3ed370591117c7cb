//! Configuration for the PetFriends client

use http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Account credentials used to obtain an API key.
///
/// The password is kept in a [`SecretString`] so it never shows up in
/// `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct Credentials {
    email: String,
    password: SecretString,
}

impl Credentials {
    /// Create credentials from an email and password.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into().into_boxed_str()),
        }
    }

    /// Account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Account password.
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

/// Configuration for the PetFriends client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the API
    pub base_url: Option<String>,

    /// Timeout applied to every request, [`DEFAULT_TIMEOUT`] when unset
    pub timeout: Option<Duration>,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,

    /// HTTP proxy URL
    pub proxy: Option<String>,

    /// Credentials used by [`Client::login`](crate::Client::login)
    pub credentials: Option<Credentials>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: None,
            default_headers: HeaderMap::new(),
            proxy: None,
            credentials: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with credentials.
    pub fn with_credentials(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Some(Credentials::new(email, password)),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// This will look for:
    /// - `PETFRIENDS_EMAIL` and `PETFRIENDS_PASSWORD` for credentials
    /// - `PETFRIENDS_BASE_URL` for the API base URL
    /// - `PETFRIENDS_TIMEOUT` for request timeout (in seconds)
    /// - `PETFRIENDS_PROXY` for HTTP proxy
    ///
    /// Credentials are only set when both email and password are present.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, crate::error::Error> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let (Ok(email), Ok(password)) =
            (env::var("PETFRIENDS_EMAIL"), env::var("PETFRIENDS_PASSWORD"))
        {
            config.credentials = Some(Credentials::new(email, password));
        }

        if let Ok(base_url) = env::var("PETFRIENDS_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(timeout_str) = env::var("PETFRIENDS_TIMEOUT") {
            let timeout_secs = timeout_str.trim().parse::<u64>().map_err(|e| {
                crate::error::Error::InvalidConfig(format!(
                    "PETFRIENDS_TIMEOUT must be a number of seconds, got '{timeout_str}': {e}"
                ))
            })?;
            config.timeout = Some(Duration::from_secs(timeout_secs));
        }

        if let Ok(proxy) = env::var("PETFRIENDS_PROXY") {
            config.proxy = Some(proxy);
        }

        Ok(config)
    }

    /// Effective request timeout.
    pub fn timeout_or_default(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Merge this configuration with another, with the other taking precedence.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }
        for (key, value) in other.default_headers.iter() {
            self.default_headers.insert(key.clone(), value.clone());
        }
        if other.proxy.is_some() {
            self.proxy = other.proxy;
        }
        if other.credentials.is_some() {
            self.credentials = other.credentials;
        }

        self
    }
}
