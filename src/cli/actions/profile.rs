use crate::{
    cli::actions::require_user,
    components::{Notifier, Toast},
    features::{auth::AuthContext, profile::ProfileImage},
    routes::profile::ProfileUpdateForm,
};
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

/// Handle `profile update`
pub async fn update(
    auth: &AuthContext,
    notifier: &dyn Notifier,
    email: Option<String>,
    username: Option<String>,
    profile_image: Option<PathBuf>,
) -> Result<()> {
    let Some(user) = require_user(auth, notifier).await else {
        return Ok(());
    };

    let mut form = ProfileUpdateForm::for_user(&user);
    if let Some(email) = email {
        form.email = email;
    }
    if let Some(username) = username {
        form.username = username;
    }
    if let Some(path) = profile_image {
        match ProfileImage::from_path(&path).await {
            Ok(image) => form.profile_image = Some(image),
            Err(err) => {
                notifier.notify(Toast::error("Error", err.message()));
                return Ok(());
            }
        }
    }

    match form.submit(auth, notifier).await {
        Ok(Some(user)) => println!("Profile: {} ({})", user.username, user.email),
        Ok(None) => debug!("profile refresh after update found no session"),
        Err(err) => debug!(error = %err, "profile update failed"),
    }

    Ok(())
}
