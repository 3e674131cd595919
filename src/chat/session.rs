use chrono::Local;
use uuid::Uuid;

use crate::common::{ChatMessage, OutboundMessage, Role};
use crate::network::{WebhookError, WebhookTransport};
use crate::storage::{KeyValueStore, SESSION_ID_KEY, StorageError};

/// Bot message appended when a webhook exchange fails for any reason.
pub const WEBHOOK_FAILURE_MESSAGE: &str = "Erro ao chamar o webhook: ";

/// Whether a webhook request is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendState {
    #[default]
    Idle,
    Sending,
}

/// Result of [`ChatSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Preconditions failed; nothing was appended or sent.
    Rejected,
    Replied,
    /// The failure message was appended; carries the underlying cause.
    Failed(String),
}

/// Transcript, session id and send guard of one chat window.
#[derive(Debug, Default)]
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    next_id: u64,
    state: SendState,
    session_id: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the persisted session id, generating and storing one the
    /// first time. An existing value is never replaced.
    pub fn bootstrap_session_id(
        &mut self,
        store: &dyn KeyValueStore,
    ) -> Result<&str, StorageError> {
        let session_id = match store.get(SESSION_ID_KEY)? {
            Some(existing) if !existing.is_empty() => existing,
            _ => {
                let generated = Uuid::new_v4().to_string();
                store.set(SESSION_ID_KEY, &generated)?;
                log::info!("Generated new chat session id {generated}");
                generated
            }
        };
        Ok(self.session_id.insert(session_id).as_str())
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_sending(&self) -> bool {
        self.state == SendState::Sending
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// True when `input` would be accepted by [`Self::begin_submit`].
    pub fn can_submit(&self, input: &str) -> bool {
        !input.trim().is_empty() && self.state == SendState::Idle && self.session_id.is_some()
    }

    /// Guarded `Idle -> Sending` transition.
    ///
    /// On success the input is cleared, the user message is appended and the
    /// body to post is returned. Otherwise nothing changes.
    pub fn begin_submit(&mut self, input: &mut String) -> Option<OutboundMessage> {
        if !self.can_submit(input) {
            return None;
        }
        let session_id = self.session_id.clone()?;

        let text = input.trim().to_string();
        input.clear();
        self.push(Role::User, text.clone());
        self.state = SendState::Sending;

        Some(OutboundMessage {
            message: text,
            session_id,
        })
    }

    /// Record the outcome of the in-flight exchange and return to `Idle`.
    pub fn settle(&mut self, outcome: Result<String, WebhookError>) {
        if self.state != SendState::Sending {
            log::warn!("Ignoring webhook outcome with no request in flight");
            return;
        }

        let content = match outcome {
            Ok(reply) => reply,
            Err(err) => {
                log::warn!("Chat exchange failed: {err}");
                WEBHOOK_FAILURE_MESSAGE.to_string()
            }
        };
        self.push(Role::Bot, content);
        self.state = SendState::Idle;
    }

    /// Run a whole exchange in place.
    pub async fn submit(
        &mut self,
        input: &mut String,
        transport: &impl WebhookTransport,
    ) -> SubmitOutcome {
        let Some(outbound) = self.begin_submit(input) else {
            return SubmitOutcome::Rejected;
        };
        let outcome = transport.send(&outbound).await;
        let result = match &outcome {
            Ok(_) => SubmitOutcome::Replied,
            Err(err) => SubmitOutcome::Failed(err.to_string()),
        };
        self.settle(outcome);
        result
    }

    fn push(&mut self, role: Role, content: String) {
        self.transcript.push(ChatMessage {
            id: self.next_id,
            role,
            content,
            created_at: Local::now().format("%H:%M").to_string(),
        });
        self.next_id += 1;
    }
}
