//! Notice shown by the login and signup views when a user is already
//! authenticated, so the forms never submit over an existing session.

use crate::features::auth::User;

#[must_use]
pub fn render(user: &User) -> String {
    format!(
        "You're already signed in as {} ({}).\nRun `gatehouse dashboard` to continue or `gatehouse logout` to switch accounts.",
        user.username, user.email
    )
}
