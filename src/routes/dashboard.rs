use crate::{
    components::{Notifier, Toast},
    features::auth::{require_auth, AuthContext, AuthState, Gate, User},
    shared::AppError,
};
use std::fmt::Write;

/// Renders the profile dashboard behind the protected-route gate.
#[must_use]
pub fn render(state: &AuthState) -> Gate<String> {
    require_auth(state).map(profile_card)
}

fn profile_card(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dashboard");
    let _ = writeln!(out, "=========");
    let _ = writeln!(out, "[{}] {}", user.initial(), user.username);
    let _ = writeln!(out, "  Email:    {}", user.email);
    let _ = writeln!(out, "  User ID:  {}", user.id);
    let _ = writeln!(
        out,
        "  Avatar:   {}",
        user.profile_image_url.as_deref().unwrap_or("none")
    );
    let _ = writeln!(out);
    let _ = write!(
        out,
        "Welcome back, {}! You're successfully authenticated and ready to explore your dashboard.",
        user.username
    );
    out
}

/// Logs out from the dashboard. Local state is cleared even when this errors.
///
/// # Errors
/// Returns the remote logout failure after notifying.
pub async fn logout(auth: &AuthContext, notifier: &dyn Notifier) -> Result<(), AppError> {
    match auth.logout().await {
        Ok(()) => {
            notifier.notify(Toast::success(
                "Logged out",
                "You've been successfully logged out.",
            ));
            Ok(())
        }
        Err(err) => {
            notifier.notify(Toast::error(
                "Error",
                "Failed to logout. Please try again.",
            ));
            Err(err)
        }
    }
}
