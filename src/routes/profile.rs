use crate::{
    components::{Notifier, Toast},
    features::{
        auth::{AuthContext, User},
        profile::{ProfileImage, ProfileUpdate},
    },
    routes::valid_email,
    shared::AppError,
};

/// Profile edit form, pre-filled from the current user.
#[derive(Clone, Debug)]
pub struct ProfileUpdateForm {
    pub email: String,
    pub username: String,
    pub profile_image: Option<ProfileImage>,
}

impl ProfileUpdateForm {
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            username: user.username.clone(),
            profile_image: None,
        }
    }

    /// Only fields that differ from `user` are part of the update.
    #[must_use]
    pub fn changes(&self, user: &User) -> ProfileUpdate {
        let email = self.email.trim();
        let username = self.username.trim();
        ProfileUpdate {
            email: (email != user.email).then(|| email.to_string()),
            username: (username != user.username).then(|| username.to_string()),
            profile_image: self.profile_image.clone(),
        }
    }

    fn validate(update: &ProfileUpdate) -> Result<(), AppError> {
        if let Some(email) = &update.email {
            if !valid_email(email) {
                return Err(AppError::Validation(
                    "Please enter a valid email address".to_string(),
                ));
            }
        }
        if update.username.as_deref().is_some_and(str::is_empty) {
            return Err(AppError::Validation("Username cannot be empty".to_string()));
        }
        if update
            .profile_image
            .as_ref()
            .is_some_and(|image| !image.is_image())
        {
            return Err(AppError::Validation(
                "Profile image must be an image file".to_string(),
            ));
        }
        Ok(())
    }

    /// Sends the changed fields, then re-checks auth to pick up the new profile.
    ///
    /// # Errors
    /// Returns validation or gateway errors after notifying.
    pub async fn submit(
        &self,
        auth: &AuthContext,
        notifier: &dyn Notifier,
    ) -> Result<Option<User>, AppError> {
        let Some(current) = auth.user() else {
            let err = AppError::Validation("You must be signed in to update your profile".to_string());
            notifier.notify(Toast::error("Error", err.message()));
            return Err(err);
        };

        let update = self.changes(&current);
        if update.is_empty() {
            notifier.notify(Toast::success("Nothing to update", "Your profile is unchanged."));
            return Ok(Some(current));
        }

        if let Err(err) = Self::validate(&update) {
            notifier.notify(Toast::error("Error", err.message()));
            return Err(err);
        }

        if let Err(err) = auth.gateway().update_profile(&update).await {
            let message = match err.message() {
                "" => "Failed to update profile",
                message => message,
            };
            notifier.notify(Toast::error("Error", message));
            return Err(err);
        }

        let refreshed = auth.check_auth().await;
        notifier.notify(Toast::success(
            "Profile updated!",
            "Your profile has been successfully updated.",
        ));
        Ok(refreshed)
    }
}
