//! HTTP request building and response handling
//!
//! Requests are sent exactly once. Whatever the service answers, including
//! 4xx and 5xx statuses, comes back as an [`ApiResponse`].

pub use request::{MultipartPart, RequestBody, RequestBuilder};
pub use response::{ApiResponse, ResponseBody};

mod request;
mod response;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
