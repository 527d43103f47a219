//! Session records as listed by `GET /sessions`.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// One active login of the current user on some device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SessionRecord")]
pub struct Session {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_agent: String,
    pub ip_address: String,
    pub location: Option<String>,
    /// Empty when the server omitted it.
    pub created_at: String,
    pub active: bool,
}

/// Wire shape of a session. One incomplete record must not fail the list.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    #[serde(rename = "_id")]
    object_id: Option<String>,
    id: Option<String>,
    #[serde(default)]
    user_agent: String,
    #[serde(default)]
    ip_address: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    created_at: String,
    #[serde(default = "default_active")]
    active: bool,
}

impl TryFrom<SessionRecord> for Session {
    type Error = String;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let id = record
            .object_id
            .or(record.id)
            .ok_or_else(|| "missing field `_id` or `id`".to_string())?;
        Ok(Self {
            id,
            user_agent: record.user_agent,
            ip_address: record.ip_address,
            location: record.location,
            created_at: record.created_at,
            active: record.active,
        })
    }
}

impl Session {
    /// Location for display; empty or missing reads as "Unknown".
    #[must_use]
    pub fn location_label(&self) -> &str {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .unwrap_or("Unknown")
    }

    /// Creation time as `Mon D, YYYY, HH:MM AM` in local time, the raw value
    /// when it is not RFC 3339, or "Unknown" when missing.
    #[must_use]
    pub fn created_label(&self) -> String {
        if self.created_at.trim().is_empty() {
            return "Unknown".to_string();
        }
        DateTime::parse_from_rfc3339(&self.created_at).map_or_else(
            |_| self.created_at.clone(),
            |created| {
                created
                    .with_timezone(&Local)
                    .format("%b %-d, %Y, %I:%M %p")
                    .to_string()
            },
        )
    }
}
