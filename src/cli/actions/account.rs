use crate::{
    components::{already_signed_in, Notifier, Toast},
    features::{auth::AuthContext, profile::ProfileImage},
    routes::{dashboard, login::LoginForm, signup::SignupForm, AuthOutcome},
};
use anyhow::Result;
use secrecy::SecretString;
use std::path::PathBuf;
use tracing::debug;

fn print_outcome(outcome: &AuthOutcome) {
    match outcome {
        AuthOutcome::SignedIn(user) => println!("Signed in as {} ({})", user.username, user.email),
        AuthOutcome::AlreadySignedIn(user) => println!("{}", already_signed_in::render(user)),
    }
}

/// Handle `login`
pub async fn login(
    auth: &AuthContext,
    notifier: &dyn Notifier,
    identifier: String,
    password: SecretString,
) -> Result<()> {
    auth.init().await;

    let form = LoginForm::new(identifier, password);
    match form.submit(auth, notifier).await {
        Ok(outcome) => print_outcome(&outcome),
        Err(err) => debug!(error = %err, "login failed"),
    }

    Ok(())
}

/// Handle `register`
pub async fn register(
    auth: &AuthContext,
    notifier: &dyn Notifier,
    email: String,
    username: String,
    password: SecretString,
    profile_image: Option<PathBuf>,
) -> Result<()> {
    auth.init().await;

    let profile_image = match profile_image {
        Some(path) => match ProfileImage::from_path(&path).await {
            Ok(image) => Some(image),
            Err(err) => {
                notifier.notify(Toast::error("Error", err.message()));
                return Ok(());
            }
        },
        None => None,
    };

    let form = SignupForm {
        email,
        username,
        password,
        profile_image,
    };
    match form.submit(auth, notifier).await {
        Ok(outcome) => print_outcome(&outcome),
        Err(err) => debug!(error = %err, "registration failed"),
    }

    Ok(())
}

/// Handle `logout`
pub async fn logout(auth: &AuthContext, notifier: &dyn Notifier) -> Result<()> {
    if let Err(err) = dashboard::logout(auth, notifier).await {
        debug!(error = %err, "remote logout failed");
    }
    Ok(())
}

/// Handle `refresh`
pub async fn refresh(auth: &AuthContext, notifier: &dyn Notifier) -> Result<()> {
    match auth.gateway().refresh_token().await {
        Ok(()) => notifier.notify(Toast::success(
            "Session refreshed",
            "Your session tokens have been rotated.",
        )),
        Err(err) => notifier.notify(Toast::error("Error", err.message())),
    }
    Ok(())
}
