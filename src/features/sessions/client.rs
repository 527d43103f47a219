//! Session listing and revocation calls.

use crate::{
    features::sessions::types::Session,
    shared::{AppError, GatewayClient},
};

impl GatewayClient {
    /// Lists the current user's active sessions in server order.
    pub async fn list_sessions(&self) -> Result<Vec<Session>, AppError> {
        self.get_json(&["sessions"]).await
    }

    /// Revokes one session by id.
    pub async fn revoke_session(&self, session_id: &str) -> Result<(), AppError> {
        if session_id.trim().is_empty() {
            return Err(AppError::Validation("Session id is required".to_string()));
        }
        self.delete(&["sessions", session_id]).await
    }
}
