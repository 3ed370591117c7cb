//! API key returned by the authentication endpoint

use secrecy::{ExposeSecret, SecretString};

/// Session token sent as the `auth_key` header.
///
/// Any string can be wrapped, which is how invalid-key cases are expressed.
/// `Debug` output is redacted.
#[derive(Debug, Clone)]
pub struct AuthKey {
    key: SecretString,
}

impl AuthKey {
    /// Wrap a key string.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: SecretString::new(key.into().into_boxed_str()),
        }
    }

    /// The raw key.
    pub fn expose(&self) -> &str {
        self.key.expose_secret()
    }
}

impl From<&str> for AuthKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for AuthKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

/// Success body of `GET api/key`.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct AuthKeyBody {
    pub(crate) key: String,
}
