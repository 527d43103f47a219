use crate::{
    cli::actions::require_user,
    components::Notifier,
    features::auth::AuthContext,
    routes::sessions::{SessionsPanel, CONFIRM_REVOKE},
};
use anyhow::{bail, Result};

/// Handle `sessions list`
pub async fn list(auth: &AuthContext, notifier: &dyn Notifier) -> Result<()> {
    if require_user(auth, notifier).await.is_none() {
        return Ok(());
    }

    let panel = SessionsPanel::new(auth.gateway(), notifier);
    panel.mount().await;
    print!("{}", panel.render());
    panel.unmount();

    Ok(())
}

/// Handle `sessions revoke`
pub async fn revoke(
    auth: &AuthContext,
    notifier: &dyn Notifier,
    session_id: &str,
    confirmed: bool,
) -> Result<()> {
    if !confirmed {
        eprintln!("{CONFIRM_REVOKE}");
        bail!("session termination not confirmed, re-run with --yes");
    }

    if require_user(auth, notifier).await.is_none() {
        return Ok(());
    }

    let panel = SessionsPanel::new(auth.gateway(), notifier);
    panel.mount().await;
    panel.revoke(session_id).await;
    print!("{}", panel.render());
    panel.unmount();

    Ok(())
}
