//! API resource endpoints
//!
//! Each resource wraps one group of PetFriends endpoints and returns the raw
//! [`ApiResponse`](crate::http::ApiResponse) the service produced.

pub mod auth;
pub mod pets;

pub use auth::Auth;
pub use pets::Pets;
