use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::common::{NetworkCommand, NetworkEvent};

use super::auth::{AuthClient, AuthError};
use super::webhook::{WebhookClient, WebhookTransport};

/// Delay of the simulated password-reset request.
pub const FORGOT_PASSWORD_DELAY: Duration = Duration::from_secs(1);

/// Background task owning every outbound HTTP call.
///
/// Each command runs in its own task and produces exactly one event, so a
/// slow webhook never holds up login and the reset delay never holds up chat.
/// Single-flight per screen is the UI's job.
pub struct NetworkWorker {
    event_sender: mpsc::Sender<NetworkEvent>,
    command_receiver: mpsc::Receiver<NetworkCommand>,
    clients: Arc<Clients>,
}

struct Clients {
    webhook: WebhookClient,
    auth: AuthClient,
}

impl NetworkWorker {
    pub fn new(
        event_sender: mpsc::Sender<NetworkEvent>,
        command_receiver: mpsc::Receiver<NetworkCommand>,
        webhook: WebhookClient,
        auth: AuthClient,
    ) -> Self {
        Self {
            event_sender,
            command_receiver,
            clients: Arc::new(Clients { webhook, auth }),
        }
    }

    pub async fn run(mut self) {
        log::info!(
            "Network worker started (webhook: {})",
            self.clients.webhook.url()
        );

        while let Some(command) = self.command_receiver.recv().await {
            let clients = Arc::clone(&self.clients);
            let event_sender = self.event_sender.clone();
            tokio::spawn(async move {
                let event = clients.handle_command(command).await;
                if let Err(err) = event_sender.send(event).await {
                    log::warn!("UI is gone, dropping event: {err}");
                }
            });
        }

        log::info!("Network worker stopped");
    }
}

impl Clients {
    async fn handle_command(&self, command: NetworkCommand) -> NetworkEvent {
        match command {
            NetworkCommand::SendMessage(outbound) => {
                let outcome = self.webhook.send(&outbound).await;
                if let Err(err) = &outcome {
                    log::warn!("Webhook call failed: {err}");
                }
                NetworkEvent::WebhookSettled(outcome)
            }
            NetworkCommand::Login { email, senha } => {
                match self.auth.login(&email, &senha).await {
                    Ok(session) => {
                        log::info!("Logged in as {}", session.email);
                        NetworkEvent::LoggedIn(session)
                    }
                    Err(err) => {
                        log::warn!("Login failed: {err}");
                        NetworkEvent::AuthFailed(login_failure_text(&err))
                    }
                }
            }
            NetworkCommand::Logout { token } => match self.auth.logout(&token).await {
                Ok(()) => NetworkEvent::LoggedOut { error: None },
                Err(err) => {
                    log::warn!("Logout failed: {err}");
                    NetworkEvent::LoggedOut {
                        error: Some(err.to_string()),
                    }
                }
            },
            NetworkCommand::Register(form) => match self.auth.register(&form).await {
                Ok(()) => NetworkEvent::Registered,
                Err(err) => {
                    log::warn!("Registration failed: {err}");
                    NetworkEvent::AuthFailed(match err {
                        AuthError::Rejected(reason) => reason,
                        _ => "Erro ao cadastrar usuário".to_string(),
                    })
                }
            },
            NetworkCommand::ForgotPassword { email } => {
                log::info!("Simulating password reset for {email}");
                tokio::time::sleep(FORGOT_PASSWORD_DELAY).await;
                NetworkEvent::ResetLinkSent
            }
        }
    }
}

fn login_failure_text(err: &AuthError) -> String {
    match err {
        AuthError::Rejected(reason) => format!("Autenticação falhou: {reason}"),
        _ => "Autenticação falhou".to_string(),
    }
}
