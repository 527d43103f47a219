//! Shared client utilities for API access, configuration, errors and cookie
//! persistence.
//!
//! ## Remote API
//!
//! Every call goes to the configured base URL (default
//! `https://localhost:5000/api`) and carries the session cookies from the jar.
//! The server sets and clears those cookies; the client never places a token in
//! a header itself.
//!
//! 1. **Login / Register:** `POST /auth/login` (JSON) or `POST /auth/register`
//!    (multipart with the profile image) returns the user and sets the cookie.
//! 2. **Re-check:** `GET /auth/me` returns the user while the cookie is valid.
//! 3. **Sessions:** `GET /sessions` lists active sessions; `DELETE /sessions/{id}`
//!    revokes one.
//! 4. **Logout:** `GET /auth/logout` invalidates the cookie server-side.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated logic in routes and features.

pub mod api;
pub mod config;
pub mod cookies;
pub mod errors;

pub use api::GatewayClient;
pub use config::{AppConfig, RuntimeConfig};
pub use errors::AppError;

/// Short git revision baked in at build time.
pub const GIT_COMMIT_HASH: &str = env!("GATEHOUSE_GIT_SHA");
