//! # PetFriends
//!
//! Thin async client for the PetFriends pet-management REST API, plus the
//! acceptance suite that exercises it (see `tests/`).
//!
//! Every endpoint call returns an [`ApiResponse`]: the status code and the body,
//! parsed as JSON when possible and kept as text otherwise. HTTP error statuses
//! are data, not errors; the service is the one under test.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use petfriends::{Client, PetFields};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .credentials("me@example.com", "secret")
//!         .build()?;
//!
//!     let key = client.login().await?;
//!     let response = client
//!         .pets()
//!         .create_pet_simple(&key, &PetFields::new("Мурзик", "кот", 2))
//!         .await?;
//!
//!     assert_eq!(response.status_code(), 200);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, Credentials};
pub use error::{Error, Result};
pub use crate::http::{ApiResponse, ResponseBody};
pub use types::*;

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod resources;
pub mod types;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::{
        ApiResponse, AuthKey, Client, ClientConfig, Credentials, Error, Pet, PetFields, PetFilter,
        PetList, PetPhoto, ResponseBody, Result,
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://petfriends.skillfactory.ru/";
