use db::models::message::ChatMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatMessageCreateBody {
    pub sender_id: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ChatMessagesResponse {
    pub messages: Vec<ChatMessage>,
}
