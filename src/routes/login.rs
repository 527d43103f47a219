use crate::{
    components::{Notifier, Toast},
    features::auth::AuthContext,
    routes::AuthOutcome,
    shared::AppError,
};
use secrecy::{ExposeSecret, SecretString};

pub struct LoginForm {
    /// Username or email.
    pub identifier: String,
    pub password: SecretString,
}

impl LoginForm {
    pub fn new(identifier: impl Into<String>, password: SecretString) -> Self {
        Self {
            identifier: identifier.into(),
            password,
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.identifier.trim().is_empty() {
            return Err(AppError::Validation(
                "Please enter your email or username".to_string(),
            ));
        }
        if self.password.expose_secret().is_empty() {
            return Err(AppError::Validation("Please enter your password".to_string()));
        }
        Ok(())
    }

    /// Signs in through the auth context and reports the outcome as a toast.
    ///
    /// # Errors
    /// Returns validation or gateway errors after notifying.
    pub async fn submit(
        &self,
        auth: &AuthContext,
        notifier: &dyn Notifier,
    ) -> Result<AuthOutcome, AppError> {
        if let Some(user) = auth.user() {
            return Ok(AuthOutcome::AlreadySignedIn(user));
        }

        if let Err(err) = self.validate() {
            notifier.notify(Toast::error("Error", err.message()));
            return Err(err);
        }

        match auth.login(self.identifier.trim(), &self.password).await {
            Ok(user) => {
                notifier.notify(Toast::success(
                    "Welcome back!",
                    "You have successfully logged in.",
                ));
                Ok(AuthOutcome::SignedIn(user))
            }
            Err(err) => {
                notifier.notify(Toast::error("Error", err.message()));
                Err(err)
            }
        }
    }
}
