use std::time::{Duration, Instant};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::auth::{FieldError, ForgotPasswordForm, LoginForm, RegisterForm};
use crate::chat::ChatSession;
use crate::common::{LoginSession, NetworkCommand, NetworkEvent};
use crate::network::WebhookError;
use crate::storage::{KeyValueStore, TOKEN_EXPIRATION_KEY, TOKEN_KEY, USER_EMAIL_KEY};

/// How long a notice stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(4);
const MAX_NOTICES: usize = 5;
/// Delay before leaving the register screen after a successful sign-up.
pub const REGISTER_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Chat,
    Dashboard,
    Login,
    Register,
    ForgotPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Toast-style message shown above the current screen.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub shown_at: Instant,
}

/// Trạng thái cục bộ của UI.
pub struct AppState {
    pub screen: Screen,
    pub chat: ChatSession,
    pub input_text: String,
    pub login_form: LoginForm,
    pub register_form: RegisterForm,
    pub forgot_form: ForgotPasswordForm,
    pub field_errors: Vec<FieldError>,
    /// An auth request is waiting on the network worker.
    pub auth_pending: bool,
    pub reset_sent: bool,
    pub logged_in_as: Option<String>,
    pub notices: Vec<Notice>,
    redirect_to_login_at: Option<Instant>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Chat,
            chat: ChatSession::new(),
            input_text: String::new(),
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            forgot_form: ForgotPasswordForm::default(),
            field_errors: Vec::new(),
            auth_pending: false,
            reset_sent: false,
            logged_in_as: None,
            notices: Vec::new(),
            redirect_to_login_at: None,
        }
    }

    pub fn navigate(&mut self, screen: Screen) {
        if self.screen != screen {
            self.field_errors.clear();
            self.reset_sent = false;
        }
        self.screen = screen;
    }

    pub fn push_notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notices.push(Notice {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        });
        if self.notices.len() > MAX_NOTICES {
            self.notices.remove(0);
        }
    }

    pub fn field_error(&self, field: &str) -> Option<&'static str> {
        self.field_errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    /// Restore a previous login if its token has not expired.
    pub fn restore_login(&mut self, store: &dyn KeyValueStore, now: DateTime<Utc>) {
        let token = match store.get(TOKEN_KEY) {
            Ok(Some(token)) => token,
            Ok(None) => return,
            Err(err) => {
                log::warn!("Failed to read stored token: {err}");
                return;
            }
        };

        // A missing or unreadable expiration counts as expired.
        let expired = store
            .get(TOKEN_EXPIRATION_KEY)
            .ok()
            .flatten()
            .and_then(|raw| parse_expiration(&raw))
            .is_none_or(|expiration| expiration <= now);
        if expired || token.is_empty() {
            log::info!("Stored token expired, clearing it");
            clear_login(store);
            return;
        }

        self.logged_in_as = store.get(USER_EMAIL_KEY).ok().flatten();
    }

    pub fn begin_login(&mut self) -> Option<NetworkCommand> {
        if self.auth_pending {
            return None;
        }
        self.check(self.login_form.validate())?;
        self.auth_pending = true;
        Some(NetworkCommand::Login {
            email: self.login_form.email.trim().to_string(),
            senha: self.login_form.senha.clone(),
        })
    }

    pub fn begin_register(&mut self) -> Option<NetworkCommand> {
        if self.auth_pending {
            return None;
        }
        self.check(self.register_form.validate())?;
        self.auth_pending = true;
        Some(NetworkCommand::Register(self.register_form.clone()))
    }

    pub fn begin_forgot_password(&mut self) -> Option<NetworkCommand> {
        if self.auth_pending {
            return None;
        }
        self.check(self.forgot_form.validate())?;
        self.auth_pending = true;
        self.reset_sent = false;
        Some(NetworkCommand::ForgotPassword {
            email: self.forgot_form.email.trim().to_string(),
        })
    }

    /// Logout needs a stored token; without one the local state is simply cleared.
    pub fn begin_logout(&mut self, store: &dyn KeyValueStore) -> Option<NetworkCommand> {
        match store.get(TOKEN_KEY).ok().flatten() {
            Some(token) => Some(NetworkCommand::Logout { token }),
            None => {
                self.finish_logout(store, None);
                None
            }
        }
    }

    /// Start a chat exchange and hand it to `send`. When `send` reports that
    /// nothing will answer, the exchange is settled as failed right away.
    pub fn submit_chat(&mut self, send: impl FnOnce(NetworkCommand) -> bool) {
        let Some(outbound) = self.chat.begin_submit(&mut self.input_text) else {
            return;
        };
        if !send(NetworkCommand::SendMessage(outbound)) {
            self.chat.settle(Err(WebhookError::WorkerUnavailable));
        }
    }

    /// The worker could not take the command; undo the pending flag.
    pub fn command_rejected(&mut self) {
        self.auth_pending = false;
        self.push_notice(NoticeKind::Error, "Serviço de rede indisponível");
    }

    pub fn apply_event(&mut self, event: NetworkEvent, store: &dyn KeyValueStore) {
        match event {
            NetworkEvent::WebhookSettled(outcome) => self.chat.settle(outcome),
            NetworkEvent::LoggedIn(session) => {
                self.auth_pending = false;
                save_login(store, &session);
                self.logged_in_as = Some(session.email);
                self.login_form = LoginForm::default();
                self.push_notice(NoticeKind::Success, "Login realizado");
                self.navigate(Screen::Dashboard);
            }
            NetworkEvent::LoggedOut { error } => self.finish_logout(store, error),
            NetworkEvent::Registered => {
                self.auth_pending = false;
                self.register_form = RegisterForm::default();
                self.push_notice(NoticeKind::Success, "Usuário cadastrado com sucesso!");
                self.push_notice(NoticeKind::Success, "Redirecionando para o login");
                self.redirect_to_login_at = Some(Instant::now() + REGISTER_REDIRECT_DELAY);
            }
            NetworkEvent::ResetLinkSent => {
                self.auth_pending = false;
                self.reset_sent = true;
            }
            NetworkEvent::AuthFailed(text) => {
                self.auth_pending = false;
                self.push_notice(NoticeKind::Error, text);
            }
        }
    }

    /// Time-driven updates: pending redirect and notice expiry.
    pub fn tick(&mut self, now: Instant) {
        if self.redirect_to_login_at.is_some_and(|at| at <= now) {
            self.redirect_to_login_at = None;
            self.navigate(Screen::Login);
        }
        self.notices
            .retain(|notice| now.duration_since(notice.shown_at) < NOTICE_TTL);
    }

    fn finish_logout(&mut self, store: &dyn KeyValueStore, error: Option<String>) {
        clear_login(store);
        self.logged_in_as = None;
        match error {
            Some(error) => self.push_notice(NoticeKind::Error, error),
            None => self.push_notice(NoticeKind::Success, "Sessão encerrada"),
        }
        self.navigate(Screen::Login);
    }

    fn check(&mut self, validation: Result<(), Vec<FieldError>>) -> Option<()> {
        match validation {
            Ok(()) => {
                self.field_errors.clear();
                Some(())
            }
            Err(errors) => {
                self.field_errors = errors;
                None
            }
        }
    }
}

/// RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS` taken as UTC.
fn parse_expiration(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn save_login(store: &dyn KeyValueStore, session: &LoginSession) {
    let writes = [
        (TOKEN_KEY, session.token.as_str()),
        (TOKEN_EXPIRATION_KEY, session.expiration.as_str()),
        (USER_EMAIL_KEY, session.email.as_str()),
    ];
    for (key, value) in writes {
        if let Err(err) = store.set(key, value) {
            log::warn!("Failed to persist {key}: {err}");
        }
    }
}

fn clear_login(store: &dyn KeyValueStore) {
    for key in [TOKEN_KEY, TOKEN_EXPIRATION_KEY, USER_EMAIL_KEY] {
        if let Err(err) = store.remove(key) {
            log::warn!("Failed to clear {key}: {err}");
        }
    }
}
