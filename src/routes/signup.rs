use crate::{
    components::{Notifier, Toast},
    features::{auth::AuthContext, profile::ProfileImage},
    routes::{valid_email, AuthOutcome},
    shared::AppError,
};
use secrecy::{ExposeSecret, SecretString};

pub struct SignupForm {
    pub email: String,
    pub username: String,
    pub password: SecretString,
    /// Required; checked before anything is sent.
    pub profile_image: Option<ProfileImage>,
}

impl SignupForm {
    /// Checks every field locally and returns the image to upload.
    ///
    /// # Errors
    /// Returns `AppError::Validation` naming the first invalid field.
    pub fn validate(&self) -> Result<&ProfileImage, AppError> {
        let Some(image) = &self.profile_image else {
            return Err(AppError::Validation(
                "Please select a profile image".to_string(),
            ));
        };
        if !image.is_image() {
            return Err(AppError::Validation(
                "Profile image must be an image file".to_string(),
            ));
        }
        if !valid_email(self.email.trim()) {
            return Err(AppError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }
        if self.username.trim().is_empty() {
            return Err(AppError::Validation("Please choose a username".to_string()));
        }
        if self.password.expose_secret().is_empty() {
            return Err(AppError::Validation("Please choose a password".to_string()));
        }
        Ok(image)
    }

    /// Registers through the auth context. Invalid input never reaches the network.
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

        let image = match self.validate() {
            Ok(image) => image,
            Err(err) => {
                notifier.notify(Toast::error("Error", err.message()));
                return Err(err);
            }
        };

        let result = auth
            .register(
                self.email.trim(),
                self.username.trim(),
                &self.password,
                image,
            )
            .await;

        match result {
            Ok(user) => {
                notifier.notify(Toast::success(
                    "Account created!",
                    format!("Welcome, {}!", user.username),
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
