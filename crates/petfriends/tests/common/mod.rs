//! Common test utilities: mock service setup, body matchers, fixtures

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Once;

use petfriends::{AuthKey, Client, PetFilter, PetList, PetPhoto};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

pub const VALID_EMAIL: &str = "tester@petfriends.example";
pub const VALID_PASSWORD: &str = "correct-horse";
pub const INVALID_EMAIL: &str = "nobody@petfriends.example";
pub const INVALID_PASSWORD: &str = "wrong";
pub const VALID_KEY: &str = "ea738148a1f19838e1c5d1413877f3691a3731380e733e877b0ae729";
pub const INVALID_KEY: &str = "invalid_key";

/// HTML page the service answers with on a rejected key or credentials.
pub const FORBIDDEN_PAGE: &str =
    "<!DOCTYPE html><title>403 Forbidden</title><h1>Forbidden</h1><p>Please provide 'auth_key' Header</p>";

static TRACING: Once = Once::new();

/// Install a test subscriber once; filtered by `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Start a mock service and a client pointed at it.
pub async fn setup() -> (MockServer, Client) {
    init_tracing();
    let server = MockServer::start().await;
    let client = Client::builder()
        .base_url(server.uri())
        .credentials(VALID_EMAIL, VALID_PASSWORD)
        .build()
        .expect("Failed to build client");
    (server, client)
}

/// Path to a file under `tests/fixtures/`.
pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

/// The `images/cat1.jpg` fixture.
pub async fn cat_photo() -> PetPhoto {
    PetPhoto::from_path(fixture_path("images/cat1.jpg"))
        .await
        .expect("Failed to load photo fixture")
}

/// A pet record shaped like the service's.
pub fn pet_json(id: &str, name: &str, animal_type: &str, age: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "animal_type": animal_type,
        "age": age,
        "pet_photo": "",
        "created_at": "1700000000.0",
        "user_id": "user-1"
    })
}

/// `GET api/key`: valid credentials get [`VALID_KEY`], anything else 403.
pub async fn mount_auth(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/key"))
        .and(header("email", VALID_EMAIL))
        .and(header("password", VALID_PASSWORD))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "key": VALID_KEY })))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/key"))
        .respond_with(forbidden())
        .with_priority(10)
        .mount(server)
        .await;
}

/// Any request carrying the invalid key is refused.
pub async fn mount_invalid_key_rejection(server: &MockServer) {
    Mock::given(header("auth_key", INVALID_KEY))
        .respond_with(forbidden())
        .mount(server)
        .await;
}

/// `GET api/pets?filter=my_pets` for the valid key.
pub async fn mount_my_pets(server: &MockServer, pets: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/api/pets"))
        .and(wiremock::matchers::query_param("filter", "my_pets"))
        .and(header("auth_key", VALID_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pets": pets })))
        .mount(server)
        .await;
}

/// Failure raised by cases that need a pet the account owns.
pub const NO_MY_PETS: &str = "There is no my pets";

/// Id of the first pet owned by the key's user.
pub async fn first_own_pet_id(
    client: &Client,
    key: &AuthKey,
) -> Result<String, Box<dyn std::error::Error>> {
    let my_pets: PetList = client
        .pets()
        .list(key, PetFilter::MyPets)
        .await?
        .json()?;
    my_pets
        .first()
        .map(|pet| pet.id.clone())
        .ok_or_else(|| NO_MY_PETS.into())
}

pub fn forbidden() -> ResponseTemplate {
    ResponseTemplate::new(403)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(FORBIDDEN_PAGE)
}

/// Matches a form-encoded body containing `name=value`.
pub struct FormField {
    name: String,
    value: String,
}

impl Match for FormField {
    fn matches(&self, request: &Request) -> bool {
        url::form_urlencoded::parse(&request.body)
            .any(|(k, v)| k == self.name.as_str() && v == self.value.as_str())
    }
}

pub fn form_field(name: &str, value: &str) -> FormField {
    FormField {
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// Matches a multipart body whose text part `name` holds `value`.
pub struct MultipartText {
    name: String,
    value: String,
}

impl Match for MultipartText {
    fn matches(&self, request: &Request) -> bool {
        multipart_text_value(&request.body, &self.name).as_deref() == Some(self.value.as_str())
    }
}

pub fn multipart_text(name: &str, value: &str) -> MultipartText {
    MultipartText {
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// Matches a multipart body with a file part `name` named `file_name`.
pub struct MultipartFile {
    disposition: String,
}

impl Match for MultipartFile {
    fn matches(&self, request: &Request) -> bool {
        String::from_utf8_lossy(&request.body).contains(&self.disposition)
    }
}

pub fn multipart_file(name: &str, file_name: &str) -> MultipartFile {
    MultipartFile {
        disposition: format!("name=\"{name}\"; filename=\"{file_name}\""),
    }
}

/// Value of the text part `name`, read between the blank line after its
/// headers and the next CRLF.
fn multipart_text_value(body: &[u8], name: &str) -> Option<String> {
    let body = String::from_utf8_lossy(body);
    let marker = format!("name=\"{name}\"\r\n");
    let start = body.find(&marker)?;
    let rest = &body[start..];
    let value_start = rest.find("\r\n\r\n")? + 4;
    let rest = &rest[value_start..];
    let value_end = rest.find("\r\n")?;
    Some(rest[..value_end].to_string())
}
