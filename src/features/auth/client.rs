//! Typed auth operations on top of the shared gateway. Cookies are carried by
//! the client's jar, so none of these calls attach credentials explicitly.

use crate::{
    features::{
        auth::types::{LoginRequest, User},
        profile::types::ProfileImage,
    },
    shared::{AppError, GatewayClient},
};
use reqwest::multipart::Form;
use secrecy::{ExposeSecret, SecretString};

impl GatewayClient {
    /// Logs in with a username or email; the server sets the session cookie.
    pub async fn login(&self, identifier: &str, password: &SecretString) -> Result<User, AppError> {
        let request = LoginRequest {
            identifier,
            password: password.expose_secret(),
        };
        self.post_json(&["auth", "login"], &request).await
    }

    /// Registers a new account. The profile image travels as the `profile` file part.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &SecretString,
        profile_image: &ProfileImage,
    ) -> Result<User, AppError> {
        let form = Form::new()
            .text("email", email.to_string())
            .text("username", username.to_string())
            .text("password", password.expose_secret().to_string())
            .part("profile", profile_image.to_part()?);

        self.post_multipart(&["auth", "register"], form).await
    }

    /// Asks the server to invalidate the session cookie.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.get_empty(&["auth", "logout"]).await
    }

    /// Fetches the user bound to the current session cookie.
    pub async fn fetch_profile(&self) -> Result<User, AppError> {
        self.get_json(&["auth", "me"]).await
    }

    /// Rotates the session tokens; the response only matters for its cookies.
    pub async fn refresh_token(&self) -> Result<(), AppError> {
        self.get_empty(&["auth", "refresh-token"]).await
    }
}

#[cfg(test)]
mod tests {
    use crate::shared::{AppConfig, AppError, GatewayClient};
    use anyhow::{anyhow, Result};
    use secrecy::SecretString;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, body_string_contains, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::features::profile::types::ProfileImage;

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn client(server: &MockServer) -> Result<GatewayClient> {
        let config = AppConfig {
            api_base_url: server.uri(),
            cookie_file: ".test-cookies".into(),
            accept_invalid_certs: false,
        };
        Ok(GatewayClient::new(&config)?)
    }

    #[tokio::test]
    async fn login_posts_identifier_and_password() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({
                "identifier": "alice@example.com",
                "password": "correct"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "1",
                "username": "alice",
                "email": "alice@example.com"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = client(&server)?
            .login("alice@example.com", &SecretString::from("correct".to_string()))
            .await?;
        assert_eq!(user.username, "alice");
        Ok(())
    }

    #[tokio::test]
    async fn session_cookie_is_sent_on_later_calls() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Set-Cookie", "accessToken=abc; Path=/; HttpOnly")
                    .set_body_json(json!({
                        "id": "1",
                        "username": "alice",
                        "email": "alice@example.com"
                    })),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("cookie", "accessToken=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "1",
                "username": "alice",
                "email": "alice@example.com"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server)?;
        client.login("alice", &SecretString::from("correct".to_string())).await?;
        let user = client.fetch_profile().await?;
        assert_eq!(user.id, "1");
        Ok(())
    }

    #[tokio::test]
    async fn register_sends_multipart_with_profile_file() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .and(header_exists("content-type"))
            .and(body_string_contains("name=\"email\""))
            .and(body_string_contains("name=\"profile\"; filename=\"avatar.png\""))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "7",
                "username": "carol",
                "email": "carol@example.com",
                "profileImageUrl": "https://cdn.example.com/avatar.png"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let image = ProfileImage::new("avatar.png", "image/png", vec![0x89, b'P', b'N', b'G']);
        let user = client(&server)?
            .register(
                "carol@example.com",
                "carol",
                &SecretString::from("hunter22".to_string()),
                &image,
            )
            .await?;
        assert_eq!(user.id, "7");
        Ok(())
    }

    #[tokio::test]
    async fn register_conflict_surfaces_server_message() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({ "message": "Email already in use" })),
            )
            .mount(&server)
            .await;

        let image = ProfileImage::new("a.jpg", "image/jpeg", vec![1, 2, 3]);
        let err = client(&server)?
            .register("dup@example.com", "dup", &SecretString::from("pw".to_string()), &image)
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;
        assert_eq!(err.to_string(), "Email already in use");
        assert_eq!(err.status(), Some(409));
        Ok(())
    }

    #[tokio::test]
    async fn logout_and_refresh_ignore_bodies() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "bye" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/refresh-token"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server)?;
        client.refresh_token().await?;
        client.logout().await?;
        Ok(())
    }

    #[tokio::test]
    async fn failed_logout_without_body_uses_fallback_message() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client(&server)?.logout().await;
        assert!(matches!(
            result,
            Err(AppError::Remote { status: 500, ref message }) if message == "Something went wrong"
        ));
        Ok(())
    }
}
