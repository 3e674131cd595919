use crate::auth::RegisterForm;

use super::types::OutboundMessage;

/// Lệnh UI gửi xuống tầng mạng.
///
/// Every command is answered by exactly one [`super::NetworkEvent`].
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Post one chat message to the webhook.
    SendMessage(OutboundMessage),
    Login {
        email: String,
        senha: String,
    },
    Logout {
        token: String,
    },
    Register(RegisterForm),
    /// Simulated: there is no reset endpoint, the worker only waits.
    ForgotPassword {
        email: String,
    },
}
