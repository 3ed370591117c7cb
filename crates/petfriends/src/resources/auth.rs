//! Authentication endpoint

use crate::{
    client::Client,
    config::Credentials,
    error::{Error, Result},
    http::ApiResponse,
    types::{AuthKey, AuthKeyBody},
};

/// Authentication resource (`GET api/key`).
#[derive(Clone)]
pub struct Auth {
    client: Client,
}

impl Auth {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Request an API key. Credentials travel as the `email` and `password`
    /// headers. The response is returned as-is, whatever its status.
    pub async fn get_api_key(&self, email: &str, password: &str) -> Result<ApiResponse> {
        self.client
            .request(http::Method::GET, "api/key")?
            .header("email", email)?
            .header("password", password)?
            .send()
            .await
    }

    /// Request an API key and return it, failing on any non-2xx status.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use petfriends::{Client, Credentials};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::new();
    /// let key = client
    ///     .auth()
    ///     .login(&Credentials::new("me@example.com", "secret"))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthKey> {
        let body: AuthKeyBody = self
            .get_api_key(credentials.email(), credentials.password())
            .await?
            .into_result()
            .map_err(|e| match e {
                Error::Serialization(e) => {
                    Error::ResponseValidation(format!("API key response has no key: {e}"))
                }
                other => other,
            })?;

        tracing::debug!(email = %credentials.email(), "Obtained API key");
        Ok(AuthKey::new(body.key))
    }
}

