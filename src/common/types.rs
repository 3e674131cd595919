use serde::{Deserialize, Serialize};

/// Vai trò của một tin nhắn trong transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// Domain model đại diện một tin nhắn chat.
///
/// `id` is assigned by the session at append time, so transcript order and
/// id order always agree. `created_at` is only for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub created_at: String,
}

/// JSON body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub message: String,
    pub session_id: String,
}

/// Token returned by the login API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    pub email: String,
    pub token: String,
    pub expiration: String,
}
