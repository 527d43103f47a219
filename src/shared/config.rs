//! Client configuration with a build-time default and runtime overrides.
//! The build-time API base comes from `GATEHOUSE_API_URL` at compile time;
//! CLI flags and environment variables override it per invocation.
//! Configuration values are public; do not store secrets here.

use super::errors::AppError;
use std::path::PathBuf;
use url::Url;

/// Base URL used when neither the build nor the runtime provides one.
pub const DEFAULT_API_BASE_URL: &str = "https://localhost:5000/api";
/// Cookie file used when none is configured.
pub const DEFAULT_COOKIE_FILE: &str = ".gatehouse-cookies";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub cookie_file: PathBuf,
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Default)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    pub cookie_file: Option<String>,
    pub accept_invalid_certs: Option<bool>,
}

impl AppConfig {
    /// Loads the build-time defaults and applies runtime overrides.
    #[must_use]
    pub fn load(runtime: RuntimeConfig) -> Self {
        let api_base_url = option_env!("GATEHOUSE_API_URL").unwrap_or(DEFAULT_API_BASE_URL);

        let mut config = Self {
            api_base_url: api_base_url.to_string(),
            cookie_file: PathBuf::from(DEFAULT_COOKIE_FILE),
            accept_invalid_certs: false,
        };

        apply_runtime_overrides(&mut config, runtime);

        config
    }

    /// Parses the base URL, rejecting anything that is not http(s).
    ///
    /// # Errors
    /// Returns `AppError::Config` when the URL does not parse or uses another scheme.
    pub fn base_url(&self) -> Result<Url, AppError> {
        let url = Url::parse(self.api_base_url.trim())
            .map_err(|err| AppError::Config(format!("Invalid API base URL: {err}")))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(AppError::Config(format!(
                "Unsupported API base URL scheme: {scheme}"
            ))),
        }
    }
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url.as_deref().and_then(normalize_runtime_value) {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.cookie_file.as_deref().and_then(normalize_runtime_value) {
        config.cookie_file = PathBuf::from(value);
    }
    if let Some(value) = runtime.accept_invalid_certs {
        config.accept_invalid_certs = value;
    }
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
