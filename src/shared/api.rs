//! HTTP plumbing for the remote auth API. Feature clients add their typed
//! operations on top of `GatewayClient` so request setup, cookie transport and
//! error mapping live in one place. The helpers never log request bodies;
//! callers pass passwords as `SecretString` and expose them only when encoding.

use super::{config::AppConfig, errors::AppError};
use reqwest::{
    cookie::Jar, multipart::Form, Client, Method, RequestBuilder, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info_span, warn, Instrument};
use url::Url;

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Maximum number of error message characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;
/// Message used when the server gives no usable error body.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// Paths the feature clients call, relative to the base URL.
const ROUTES: &[&[&str]] = &[
    &["auth", "login"],
    &["auth", "register"],
    &["auth", "logout"],
    &["auth", "me"],
    &["auth", "refresh-token"],
    &["auth", "profile"],
    &["sessions"],
];

/// Thin client for the remote auth service. Cloning is cheap and clones share
/// the same connection pool and cookie jar.
#[derive(Clone, Debug)]
pub struct GatewayClient {
    client: Client,
    base_url: Url,
    jar: Arc<Jar>,
}

impl GatewayClient {
    /// Builds a client with an empty cookie jar.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Self::with_jar(config, Arc::new(Jar::default()))
    }

    /// Builds a client around an existing cookie jar, e.g. one restored from disk.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the base URL is invalid or the HTTP client cannot be built.
    pub fn with_jar(config: &AppConfig, jar: Arc<Jar>) -> Result<Self, AppError> {
        let base_url = config.base_url()?;

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_provider(Arc::clone(&jar))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url,
            jar,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    /// Appends path segments to the base URL. Segments are percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::Config("API base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Every URL this client sends cookies to: the host root, the base URL and
    /// each route. Path-scoped cookies are visible at one of them.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the base URL cannot carry a path.
    pub fn cookie_urls(&self) -> Result<Vec<Url>, AppError> {
        let mut root = self.base_url.clone();
        root.set_path("/");

        let mut urls = vec![root, self.base_url.clone()];
        for route in ROUTES {
            urls.push(self.endpoint(route)?);
        }
        Ok(urls)
    }

    /// GET and decode a JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, AppError> {
        let url = self.endpoint(segments)?;
        let response = self.send(Method::GET, self.client.get(url.clone()), &url).await?;
        handle_json_response(response).await
    }

    /// GET where the response body carries nothing the caller needs.
    pub(crate) async fn get_empty(&self, segments: &[&str]) -> Result<(), AppError> {
        let url = self.endpoint(segments)?;
        let response = self.send(Method::GET, self.client.get(url.clone()), &url).await?;
        handle_empty_response(response).await
    }

    /// POST a JSON body and decode a JSON response.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, AppError> {
        let url = self.endpoint(segments)?;
        let builder = self.client.post(url.clone()).json(body);
        let response = self.send(Method::POST, builder, &url).await?;
        handle_json_response(response).await
    }

    /// POST multipart form data and decode a JSON response.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        form: Form,
    ) -> Result<T, AppError> {
        let url = self.endpoint(segments)?;
        let builder = self.client.post(url.clone()).multipart(form);
        let response = self.send(Method::POST, builder, &url).await?;
        handle_json_response(response).await
    }

    /// PUT multipart form data, ignoring the response body.
    pub(crate) async fn put_multipart(&self, segments: &[&str], form: Form) -> Result<(), AppError> {
        let url = self.endpoint(segments)?;
        let builder = self.client.put(url.clone()).multipart(form);
        let response = self.send(Method::PUT, builder, &url).await?;
        handle_empty_response(response).await
    }

    /// DELETE, ignoring the response body.
    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<(), AppError> {
        let url = self.endpoint(segments)?;
        let response = self.send(Method::DELETE, self.client.delete(url.clone()), &url).await?;
        handle_empty_response(response).await
    }

    /// Sends a single request; there is no retry and no client-side timeout.
    async fn send(&self, method: Method, builder: RequestBuilder, url: &Url) -> Result<Response, AppError> {
        let span = info_span!("gateway.request", http.method = %method, path = %url.path());

        async {
            let response = builder.send().await.map_err(map_request_error)?;
            debug!(status = %response.status(), "response received");
            Ok(response)
        }
        .instrument(span)
        .await
    }
}

/// Maps transport failures into user-facing errors.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_builder() {
        return AppError::Config(format!("Failed to build request: {err}"));
    }
    if err.is_timeout() {
        return AppError::Transport("Request timed out. Please try again.".to_string());
    }
    AppError::Transport(format!("Unable to reach the server: {err}"))
}

/// Decodes a JSON response or surfaces the server's error message.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(remote_error(status, response).await)
    }
}

/// Accepts any success body and surfaces errors like `handle_json_response`.
async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(remote_error(status, response).await)
    }
}

async fn remote_error(status: StatusCode, response: Response) -> AppError {
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);
    warn!(status = status.as_u16(), "remote call failed");
    AppError::Remote {
        status: status.as_u16(),
        message,
    }
}

/// Extracts `{message}` from an error body, falling back to a generic message.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map_or_else(
            || FALLBACK_ERROR_MESSAGE.to_string(),
            |message| message.chars().take(MAX_ERROR_CHARS).collect(),
        )
}
