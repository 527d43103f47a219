//! Command handlers. Each command builds the auth context from the persisted
//! cookie jar, drives one view, then writes the jar back so the next
//! invocation sees the same session.

pub mod account;
pub mod dashboard;
pub mod profile;
pub mod sessions;

use crate::{
    cli::globals::GlobalArgs,
    components::{ConsoleNotifier, MemoryNotifier, Notifier, Tee, Toast},
    features::auth::{require_auth, AuthContext, Gate, User},
    shared::{cookies, GatewayClient},
};
use anyhow::Result;
use secrecy::SecretString;
use std::{path::PathBuf, process::ExitCode, sync::Arc};
use tracing::debug;

#[derive(Debug)]
pub enum Action {
    Login {
        identifier: String,
        password: SecretString,
    },
    Register {
        email: String,
        username: String,
        password: SecretString,
        profile_image: Option<PathBuf>,
    },
    Logout,
    Dashboard,
    Refresh,
    Sessions(SessionsAction),
    UpdateProfile {
        email: Option<String>,
        username: Option<String>,
        profile_image: Option<PathBuf>,
    },
}

#[derive(Debug)]
pub enum SessionsAction {
    List,
    Revoke { id: String, confirmed: bool },
}

/// Runs one action. The exit code is a failure when any view reported an error.
///
/// # Errors
/// Returns an error when configuration, cookie persistence or a precondition fails.
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<ExitCode> {
    let config = &globals.config;
    let base_url = config.base_url()?;
    let jar = cookies::load_jar(&config.cookie_file, &base_url)?;
    let auth = AuthContext::new(GatewayClient::with_jar(config, Arc::clone(&jar))?);

    let console = ConsoleNotifier;
    let memory = MemoryNotifier::default();
    let notifier = Tee(&console, &memory);

    let forget_session = matches!(action, Action::Logout);
    let result = match action {
        Action::Login {
            identifier,
            password,
        } => account::login(&auth, &notifier, identifier, password).await,
        Action::Register {
            email,
            username,
            password,
            profile_image,
        } => account::register(&auth, &notifier, email, username, password, profile_image).await,
        Action::Logout => account::logout(&auth, &notifier).await,
        Action::Refresh => account::refresh(&auth, &notifier).await,
        Action::Dashboard => dashboard::show(&auth, &notifier).await,
        Action::Sessions(SessionsAction::List) => sessions::list(&auth, &notifier).await,
        Action::Sessions(SessionsAction::Revoke { id, confirmed }) => {
            sessions::revoke(&auth, &notifier, &id, confirmed).await
        }
        Action::UpdateProfile {
            email,
            username,
            profile_image,
        } => profile::update(&auth, &notifier, email, username, profile_image).await,
    };

    if forget_session {
        cookies::clear(&config.cookie_file)?;
    } else {
        cookies::save_jar(&jar, &config.cookie_file, &auth.gateway().cookie_urls()?)?;
    }

    result?;

    if memory.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Runs the initial session check and applies the protected-route gate.
/// Returns the user when the view may render.
pub(crate) async fn require_user(auth: &AuthContext, notifier: &dyn Notifier) -> Option<User> {
    auth.init().await;
    let state = auth.settled().await;

    match require_auth(&state) {
        Gate::Render(user) => Some(user.clone()),
        Gate::Placeholder => None,
        Gate::Redirect(path) => {
            debug!(path, "not signed in, redirecting");
            notifier.notify(Toast::error(
                "Not signed in",
                "Sign in with `gatehouse login` to continue.",
            ));
            None
        }
    }
}
