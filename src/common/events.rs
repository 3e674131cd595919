use crate::network::WebhookError;

use super::types::LoginSession;

/// Sự kiện từ tầng mạng gửi lên UI.
#[derive(Debug)]
pub enum NetworkEvent {
    WebhookSettled(Result<String, WebhookError>),
    LoggedIn(LoginSession),
    /// Logout always ends the local session; `error` carries the API complaint if any.
    LoggedOut {
        error: Option<String>,
    },
    Registered,
    ResetLinkSent,
    AuthFailed(String),
}
