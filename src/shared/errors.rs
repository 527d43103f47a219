use thiserror::Error;

/// Errors surfaced to views. Every variant carries a message fit for a toast.
#[derive(Clone, Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Transport(String),
    #[error("{message}")]
    Remote { status: u16, message: String },
    #[error("{0}")]
    Validation(String),
    #[error("Response error: {0}")]
    Parse(String),
    #[error("I/O error: {0}")]
    Io(String),
}

impl AppError {
    /// Human-readable message without the variant prefix, used for toasts.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            AppError::Config(message)
            | AppError::Transport(message)
            | AppError::Validation(message)
            | AppError::Parse(message)
            | AppError::Io(message)
            | AppError::Remote { message, .. } => message,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn remote_error_displays_server_message() {
        let err = AppError::Remote {
            status: 401,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn message_strips_variant_prefix() {
        let err = AppError::Transport("Unable to reach the server".to_string());
        assert_eq!(err.to_string(), "Network error: Unable to reach the server");
        assert_eq!(err.message(), "Unable to reach the server");
        assert_eq!(err.status(), None);
    }
}
