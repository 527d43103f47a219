//! Auth state shared by every view of one running client. The context holds
//! the only copy of the current user and publishes changes through a watch
//! channel, so dependent views can re-render on login, logout or re-check.
//! Only non-sensitive identity metadata is kept in memory.
//!
//! Every operation takes a ticket from a monotonic counter when it starts. A
//! resolution is applied only when its ticket is newer than the last applied
//! one, so a slow re-check can never overwrite a later login. Logout always
//! applies and retires every ticket issued before it resolves.

use crate::{
    features::{auth::types::User, profile::types::ProfileImage},
    shared::{AppError, GatewayClient},
};
use secrecy::SecretString;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_loading: bool,
    /// Ticket of the last operation whose result was applied.
    pub version: u64,
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
            version: 0,
        }
    }
}

/// Auth context injected by reference into views.
#[derive(Debug)]
pub struct AuthContext {
    gateway: GatewayClient,
    state: watch::Sender<AuthState>,
    tickets: AtomicU64,
}

impl AuthContext {
    /// Starts unauthenticated with `is_loading` set until the first check settles.
    #[must_use]
    pub fn new(gateway: GatewayClient) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            gateway,
            state,
            tickets: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn gateway(&self) -> &GatewayClient {
        &self.gateway
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Receiver that observes every applied state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Runs the initial "am I logged in" check.
    pub async fn init(&self) -> Option<User> {
        self.check_auth().await
    }

    /// Waits until no check is pending and returns the settled state.
    pub async fn settled(&self) -> AuthState {
        let mut receiver = self.state.subscribe();
        let settled = receiver
            .wait_for(|state| !state.is_loading)
            .await
            .map(|state| state.clone());
        // The sender lives in `self`, so the channel cannot close while we wait.
        settled.unwrap_or_else(|_| self.state())
    }

    /// Logs in and stores the returned user. Errors propagate unchanged.
    ///
    /// # Errors
    /// Returns the gateway error; local state is left untouched.
    pub async fn login(&self, identifier: &str, password: &SecretString) -> Result<User, AppError> {
        let ticket = self.next_ticket();
        let user = self.gateway.login(identifier, password).await?;
        self.store_user(ticket, user.clone());
        info!(user_id = %user.id, "signed in");
        Ok(user)
    }

    /// Registers an account and stores the returned user.
    ///
    /// # Errors
    /// Returns the gateway error; local state is left untouched.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &SecretString,
        profile_image: &ProfileImage,
    ) -> Result<User, AppError> {
        let ticket = self.next_ticket();
        let user = self
            .gateway
            .register(email, username, password, profile_image)
            .await?;
        self.store_user(ticket, user.clone());
        info!(user_id = %user.id, "registered");
        Ok(user)
    }

    /// Logs out remotely, then clears the local user whatever the outcome.
    ///
    /// # Errors
    /// Returns the remote failure after local state has already been cleared.
    pub async fn logout(&self) -> Result<(), AppError> {
        let result = self.gateway.logout().await;
        if let Err(err) = &result {
            warn!(error = %err, "remote logout failed, clearing local session anyway");
        }

        let newest = self.tickets.load(Ordering::SeqCst);
        self.state.send_modify(|state| {
            state.user = None;
            state.is_loading = false;
            state.version = state.version.max(newest);
        });
        info!("signed out");

        result
    }

    /// Re-checks the session. Any failure, transient or not, means signed out.
    /// Returns the user held after the check, which is a newer operation's
    /// result when this check resolved stale.
    pub async fn check_auth(&self) -> Option<User> {
        let ticket = self.next_ticket();
        let user = match self.gateway.fetch_profile().await {
            Ok(user) => Some(user),
            Err(err) => {
                debug!(error = %err, "session check failed");
                None
            }
        };

        let applied = self.apply(ticket, |state| {
            state.user = user;
            state.is_loading = false;
        });
        if !applied {
            debug!(ticket, "discarding stale session check");
        }

        self.user()
    }

    fn store_user(&self, ticket: u64, user: User) {
        let applied = self.apply(ticket, |state| {
            state.user = Some(user);
            state.is_loading = false;
        });
        if !applied {
            debug!(ticket, "discarding stale sign-in result");
        }
    }

    fn next_ticket(&self) -> u64 {
        self.tickets.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn apply(&self, ticket: u64, update: impl FnOnce(&mut AuthState)) -> bool {
        self.state.send_if_modified(|state| {
            if ticket <= state.version {
                return false;
            }
            update(state);
            state.version = ticket;
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::AppConfig;
    use anyhow::{anyhow, Result};
    use serde_json::json;
    use std::{net::TcpListener, time::Duration};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn context(base: &str) -> Result<AuthContext> {
        let config = AppConfig {
            api_base_url: base.to_string(),
            cookie_file: ".test-cookies".into(),
            accept_invalid_certs: false,
        };
        Ok(AuthContext::new(GatewayClient::new(&config)?))
    }

    fn alice() -> serde_json::Value {
        json!({ "id": "1", "username": "alice", "email": "alice@example.com" })
    }

    #[test]
    fn starts_unauthenticated_and_loading() -> Result<()> {
        let auth = context("http://127.0.0.1:9")?;
        let state = auth.state();
        assert!(state.user.is_none());
        assert!(state.is_loading);
        assert_eq!(state.version, 0);
        Ok(())
    }

    #[tokio::test]
    async fn login_stores_user_and_clears_loading() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alice()))
            .mount(&server)
            .await;

        let auth = context(&server.uri())?;
        let mut changes = auth.subscribe();
        auth.login("alice@example.com", &SecretString::from("correct".to_string()))
            .await?;

        assert!(changes.has_changed()?);
        let state = changes.borrow_and_update().clone();
        assert_eq!(state.user.map(|user| user.username), Some("alice".to_string()));
        assert!(!state.is_loading);
        Ok(())
    }

    #[tokio::test]
    async fn failed_login_leaves_state_untouched() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
            )
            .mount(&server)
            .await;

        let auth = context(&server.uri())?;
        let before = auth.state();
        let err = auth
            .login("alice", &SecretString::from("wrong".to_string()))
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;

        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(auth.state(), before);
        Ok(())
    }

    #[tokio::test]
    async fn logout_clears_user_even_when_remote_fails() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alice()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let auth = context(&server.uri())?;
        auth.login("alice", &SecretString::from("correct".to_string()))
            .await?;
        assert!(auth.is_authenticated());

        let result = auth.logout().await;
        assert!(result.is_err());
        assert!(auth.user().is_none());
        assert!(!auth.state().is_loading);
        Ok(())
    }

    #[tokio::test]
    async fn logout_clears_user_when_server_is_unreachable() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        drop(listener);

        let auth = context(&format!("http://{addr}"))?;
        let result = auth.logout().await;
        assert!(matches!(result, Err(AppError::Transport(_))));
        assert!(auth.user().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn check_auth_failure_means_signed_out() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        drop(listener);

        let auth = context(&format!("http://{addr}"))?;
        assert!(auth.init().await.is_none());

        let state = auth.settled().await;
        assert!(state.user.is_none());
        assert!(!state.is_loading);
        Ok(())
    }

    #[tokio::test]
    async fn check_auth_replaces_user() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "1",
                "username": "alice-renamed",
                "email": "alice@example.com"
            })))
            .mount(&server)
            .await;

        let auth = context(&server.uri())?;
        let user = auth.check_auth().await;
        assert_eq!(user.map(|user| user.username), Some("alice-renamed".to_string()));
        assert_eq!(auth.state().version, 1);
        Ok(())
    }

    #[tokio::test]
    async fn stale_check_does_not_overwrite_newer_login() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({ "message": "expired" }))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(alice()))
            .mount(&server)
            .await;

        let auth = context(&server.uri())?;
        let password = SecretString::from("correct".to_string());
        let (checked, logged_in) = tokio::join!(auth.check_auth(), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            auth.login("alice", &password).await
        });

        assert!(logged_in.is_ok());
        assert_eq!(auth.user().map(|user| user.id), Some("1".to_string()));
        assert_eq!(checked, auth.user());
        Ok(())
    }

    #[tokio::test]
    async fn logout_discards_in_flight_check() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(alice())
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let auth = context(&server.uri())?;
        let (checked, logged_out) = tokio::join!(auth.check_auth(), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            auth.logout().await
        });

        assert!(checked.is_none());
        assert!(logged_out.is_ok());
        assert!(auth.user().is_none());
        Ok(())
    }
}
