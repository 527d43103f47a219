//! Auth feature module covering login, registration, logout and session
//! re-checks. It keeps authentication logic out of the views and must stay
//! aligned with the remote API. This module touches security boundaries and
//! must avoid logging passwords or cookie values.
//!
//! Flow Overview: login and register return the user and set the session
//! cookie; the context stores the user. Re-checks call `/auth/me` and treat any
//! failure as signed out. Logout clears local state even if the server call
//! fails.

pub mod client;
pub mod guards;
pub mod state;
pub mod types;

pub use guards::{require_auth, Gate, LOGIN_PATH};
pub use state::{AuthContext, AuthState};
pub use types::User;
