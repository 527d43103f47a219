//! Profile editing: the image payload and the partial update call.

pub mod client;
pub mod types;

pub use types::{ProfileImage, ProfileUpdate};
