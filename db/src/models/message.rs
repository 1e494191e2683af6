use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One line of the conversation attached to a design request.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub request_id: Uuid,
    pub sender_id: String,
    /// Display name of the sender, joined from `users`.
    pub sender_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
