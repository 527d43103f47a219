//! Terminal renditions of the portal's views. Each view owns its state,
//! talks to the auth context or gateway, reports outcomes as toasts and
//! renders to text for the CLI.

pub mod dashboard;
pub mod login;
pub mod profile;
pub mod sessions;
pub mod signup;

use crate::features::auth::User;

/// Result of submitting the login or signup form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    SignedIn(User),
    /// A user was already authenticated; the form did not submit.
    AlreadySignedIn(User),
}

/// Email shape check shared by the signup and profile forms.
pub(crate) fn valid_email(email: &str) -> bool {
    regex::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}
