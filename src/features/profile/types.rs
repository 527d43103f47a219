//! Profile payloads: the uploaded image and the partial update form.

use crate::shared::AppError;
use reqwest::multipart::Part;
use std::path::Path;

/// An image file destined for the `profile` multipart part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ProfileImage {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reads an image from disk, inferring the content type from the extension.
    ///
    /// # Errors
    /// Returns `AppError::Io` if the file cannot be read.
    pub async fn from_path(path: &Path) -> Result<Self, AppError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| AppError::Io(format!("Failed to read {}: {err}", path.display())))?;

        let file_name = path
            .file_name()
            .map_or_else(|| "profile".to_string(), |name| name.to_string_lossy().into_owned());

        Ok(Self::new(file_name, content_type_for(path), bytes))
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    pub(crate) fn to_part(&self) -> Result<Part, AppError> {
        Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.content_type)
            .map_err(|err| AppError::Validation(format!("Invalid image type: {err}")))
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Fields to change on the current profile. `None` leaves a field untouched.
#[derive(Clone, Debug, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub username: Option<String>,
    pub profile_image: Option<ProfileImage>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.username.is_none() && self.profile_image.is_none()
    }
}
