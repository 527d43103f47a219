use crate::{
    cli::actions::require_user,
    components::Notifier,
    features::auth::{AuthContext, Gate},
    routes::dashboard,
};
use anyhow::Result;

/// Handle `dashboard`
pub async fn show(auth: &AuthContext, notifier: &dyn Notifier) -> Result<()> {
    if require_user(auth, notifier).await.is_none() {
        return Ok(());
    }

    if let Gate::Render(card) = dashboard::render(&auth.state()) {
        println!("{card}");
    }

    Ok(())
}
