//! Pet endpoints: list, create, photo upload, update, delete

use crate::{
    client::Client,
    error::Result,
    http::{ApiResponse, MultipartPart, RequestBuilder},
    types::{AuthKey, PetFields, PetFilter, PetList, PetPhoto},
};
use http::Method;

/// Header carrying the API key on every pet call.
pub const AUTH_KEY_HEADER: &str = "auth_key";

/// Pets resource.
///
/// Every method returns the service's answer unchanged, so callers can assert
/// on status codes such as 403 for a bad key or 400 for invalid data.
///
/// # Example
///
/// ```rust,no_run
/// # use petfriends::{AuthKey, Client, PetFields, PetFilter};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new();
/// let key = AuthKey::new("invalid_key");
///
/// let response = client.pets().list(&key, PetFilter::All).await?;
/// assert_eq!(response.status_code(), 403);
///
/// let response = client
///     .pets()
///     .update_pet_info(&key, "invalid_pet_id", &PetFields::new("Мурзик", "Котэ", 5))
///     .await?;
/// assert_eq!(response.status_code(), 403);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Pets {
    client: Client,
}

impl Pets {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn authorized(&self, method: Method, path: &str, auth_key: &AuthKey) -> Result<RequestBuilder> {
        self.client
            .request(method, path)?
            .header(AUTH_KEY_HEADER, auth_key.expose())
    }

    fn list_request(&self, auth_key: &AuthKey, filter: PetFilter) -> Result<RequestBuilder> {
        Ok(self
            .authorized(Method::GET, "api/pets", auth_key)?
            .query("filter", filter.as_str()))
    }

    /// List pets: `GET api/pets?filter=<filter>`.
    pub async fn list(&self, auth_key: &AuthKey, filter: PetFilter) -> Result<ApiResponse> {
        self.list_request(auth_key, filter)?.send().await
    }

    /// Pets owned by the key's user, failing on any non-2xx status.
    pub async fn my_pets(&self, auth_key: &AuthKey) -> Result<PetList> {
        self.list(auth_key, PetFilter::MyPets).await?.into_result()
    }

    /// Add a pet with a photo: multipart `POST api/pets`.
    pub async fn add_new_pet(
        &self,
        auth_key: &AuthKey,
        fields: &PetFields,
        photo: &PetPhoto,
    ) -> Result<ApiResponse> {
        let mut parts: Vec<MultipartPart> = fields
            .pairs()
            .into_iter()
            .map(|(name, value)| MultipartPart::text(name, value))
            .collect();
        parts.push(MultipartPart::file("pet_photo", photo.clone()));

        self.authorized(Method::POST, "api/pets", auth_key)?
            .multipart(parts)
            .send()
            .await
    }

    /// Add a pet without a photo: form-encoded `POST api/create_pet_simple`.
    pub async fn create_pet_simple(
        &self,
        auth_key: &AuthKey,
        fields: &PetFields,
    ) -> Result<ApiResponse> {
        self.authorized(Method::POST, "api/create_pet_simple", auth_key)?
            .form(fields.pairs())
            .send()
            .await
    }

    /// Attach a photo to an existing pet: multipart `POST api/pets/set_photo/<id>`.
    pub async fn set_photo(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        photo: &PetPhoto,
    ) -> Result<ApiResponse> {
        self.authorized(Method::POST, &pet_path("api/pets/set_photo", pet_id), auth_key)?
            .multipart(vec![MultipartPart::file("pet_photo", photo.clone())])
            .send()
            .await
    }

    /// Update a pet: form-encoded `PUT api/pets/<id>`.
    pub async fn update_pet_info(
        &self,
        auth_key: &AuthKey,
        pet_id: &str,
        fields: &PetFields,
    ) -> Result<ApiResponse> {
        self.authorized(Method::PUT, &pet_path("api/pets", pet_id), auth_key)?
            .form(fields.pairs())
            .send()
            .await
    }

    /// Delete a pet: `DELETE api/pets/<id>`.
    pub async fn delete_pet(&self, auth_key: &AuthKey, pet_id: &str) -> Result<ApiResponse> {
        self.authorized(Method::DELETE, &pet_path("api/pets", pet_id), auth_key)?
            .send()
            .await
    }
}

/// Join a pet id onto a path, percent-encoding it as a single segment.
fn pet_path(prefix: &str, pet_id: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(pet_id.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    format!("{prefix}/{encoded}")
}
