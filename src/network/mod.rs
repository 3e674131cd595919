pub mod auth;
pub mod client;
pub mod webhook;

pub use auth::AuthClient;
pub use client::NetworkWorker;
pub use webhook::{WebhookClient, WebhookError, WebhookTransport};
