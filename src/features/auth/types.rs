//! Request and response types for auth calls. Login payloads carry the
//! password, so they must never be logged.

use serde::{Deserialize, Serialize};

/// The authenticated identity as returned by login, register and `/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "UserRecord")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

/// Wire shape of a user. Document stores may send `_id`, `id`, or both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    #[serde(rename = "_id")]
    object_id: Option<String>,
    id: Option<String>,
    username: String,
    email: String,
    #[serde(default)]
    profile_image_url: Option<String>,
}

impl TryFrom<UserRecord> for User {
    type Error = String;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let id = record
            .object_id
            .or(record.id)
            .ok_or_else(|| "missing field `_id` or `id`".to_string())?;
        Ok(Self {
            id,
            username: record.username,
            email: record.email,
            profile_image_url: record.profile_image_url,
        })
    }
}

impl User {
    /// First letter of the username, upper-cased, used where no image is shown.
    #[must_use]
    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_accepts_mongo_style_id_and_optional_image() {
        let user: User = serde_json::from_str(
            r#"{"_id":"1","username":"alice","email":"alice@example.com"}"#,
        )
        .expect("Failed to deserialize");
        assert_eq!(user.id, "1");
        assert_eq!(user.profile_image_url, None);

        let user: User = serde_json::from_str(
            r#"{"id":"2","username":"bob","email":"bob@example.com","profileImageUrl":"https://cdn/b.png"}"#,
        )
        .expect("Failed to deserialize");
        assert_eq!(user.profile_image_url.as_deref(), Some("https://cdn/b.png"));
    }

    #[test]
    fn user_accepts_both_id_keys() {
        let user: User = serde_json::from_str(
            r#"{"_id":"1","id":"1","username":"alice","email":"alice@example.com"}"#,
        )
        .expect("Failed to deserialize");
        assert_eq!(user.id, "1");
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn user_without_any_id_is_rejected() {
        let result =
            serde_json::from_str::<User>(r#"{"username":"alice","email":"alice@example.com"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn initial_is_uppercased_first_char() {
        let user = User {
            id: "1".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            profile_image_url: None,
        };
        assert_eq!(user.initial(), "A");
    }
}
