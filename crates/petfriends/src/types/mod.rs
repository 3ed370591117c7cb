//! Request and response types

mod auth;
mod pet;
mod photo;

pub(crate) use auth::AuthKeyBody;
pub use auth::AuthKey;
pub use pet::{Pet, PetFields, PetFilter, PetList};
pub use photo::PetPhoto;
