use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

use crate::chat::extract_reply_text;
use crate::common::OutboundMessage;

/// Default n8n webhook the chat posts to.
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://guifariasstatum.app.n8n.cloud/webhook-test/send-message";

/// Ways a webhook exchange can fail. The UI shows all of them the same way.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("network worker is not running")]
    WorkerUnavailable,
}

/// Something that can deliver one chat message and return the reply text.
#[allow(async_fn_in_trait)]
pub trait WebhookTransport {
    async fn send(&self, outbound: &OutboundMessage) -> Result<String, WebhookError>;
}

/// reqwest-backed client for the n8n webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl WebhookTransport for WebhookClient {
    async fn send(&self, outbound: &OutboundMessage) -> Result<String, WebhookError> {
        log::debug!("POST {} (session {})", self.url, outbound.session_id);

        // `.json()` sets `Content-Type: application/json`.
        let response = self.http.post(&self.url).json(outbound).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await?;

        extract_reply_text(&content_type, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::reply::EMPTY_REPLY_PLACEHOLDER;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn outbound(text: &str) -> OutboundMessage {
        OutboundMessage {
            message: text.to_string(),
            session_id: "session-1".to_string(),
        }
    }

    async fn client_for(server: &MockServer) -> WebhookClient {
        WebhookClient::new(format!("{}/webhook/send-message", server.uri()))
    }

    #[tokio::test]
    async fn posts_message_and_session_id_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhook/send-message"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "message": "olá",
                "sessionId": "session-1"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "reply": "hi" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server).await.send(&outbound("olá")).await.unwrap();
        assert_eq!(reply, "hi");
    }

    #[tokio::test]
    async fn json_without_known_field_is_dumped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "foo": "bar" })),
            )
            .mount(&server)
            .await;

        let reply = client_for(&server).await.send(&outbound("x")).await.unwrap();
        assert_eq!(reply, "{\n  \"foo\": \"bar\"\n}");
    }

    #[tokio::test]
    async fn plain_text_reply_is_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
            .mount(&server)
            .await;

        let reply = client_for(&server).await.send(&outbound("ping")).await.unwrap();
        assert_eq!(reply, "pong");
    }

    #[tokio::test]
    async fn empty_text_reply_gets_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;

        let reply = client_for(&server).await.send(&outbound("ping")).await.unwrap();
        assert_eq!(reply, EMPTY_REPLY_PLACEHOLDER);
    }

    #[tokio::test]
    async fn server_error_is_status_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.send(&outbound("x")).await.unwrap_err();
        assert!(matches!(err, WebhookError::Status(500)));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_failure() {
        let client = WebhookClient::new("http://127.0.0.1:1/webhook");
        let err = client.send(&outbound("x")).await.unwrap_err();
        assert!(matches!(err, WebhookError::Transport(_)));
    }
}
