use crate::features::auth::{state::AuthState, types::User};

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/auth";

/// Outcome of the protected-route check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate<T> {
    Render(T),
    /// The initial check is still running; show nothing that implies signed out.
    Placeholder,
    Redirect(&'static str),
}

impl<T> Gate<T> {
    pub fn map<U>(self, children: impl FnOnce(T) -> U) -> Gate<U> {
        match self {
            Gate::Render(value) => Gate::Render(children(value)),
            Gate::Placeholder => Gate::Placeholder,
            Gate::Redirect(path) => Gate::Redirect(path),
        }
    }
}

/// Renders children only for an authenticated user.
/// UX-only guard; real access control must live on the API.
#[must_use]
pub fn require_auth(state: &AuthState) -> Gate<&User> {
    match (&state.user, state.is_loading) {
        (Some(user), _) => Gate::Render(user),
        (None, true) => Gate::Placeholder,
        (None, false) => Gate::Redirect(LOGIN_PATH),
    }
}
