//! Profile update call. Only the fields present in the update are sent.

use crate::{
    features::profile::types::ProfileUpdate,
    shared::{AppError, GatewayClient},
};
use reqwest::multipart::Form;

impl GatewayClient {
    /// Updates email, username and/or profile image of the current user.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), AppError> {
        let mut form = Form::new();
        if let Some(email) = &update.email {
            form = form.text("email", email.clone());
        }
        if let Some(username) = &update.username {
            form = form.text("username", username.clone());
        }
        if let Some(image) = &update.profile_image {
            form = form.part("profile", image.to_part()?);
        }

        self.put_multipart(&["auth", "profile"], form).await
    }
}
