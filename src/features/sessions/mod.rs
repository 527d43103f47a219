//! Active-session management: listing, revocation and display labels.

pub mod client;
pub mod device;
pub mod types;

pub use device::{browser_label, DeviceKind};
pub use types::Session;
