use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::auth::RegisterForm;
use crate::common::LoginSession;

pub const DEFAULT_REGISTER_PATH: &str = "/usuarios";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("API base URL is not configured (set CHAT_API_URL)")]
    NotConfigured,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Rejected(String),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    usuario: Usuario,
    value: TokenValue,
}

#[derive(Debug, Deserialize)]
struct Usuario {
    email: String,
}

#[derive(Debug, Deserialize)]
struct TokenValue {
    token: String,
    expiration: String,
}

/// Client for the login/registration REST API.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Option<String>,
    register_path: String,
}

impl AuthClient {
    pub fn new(base_url: Option<String>, register_path: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            register_path: register_path.into(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<String, AuthError> {
        let base = self.base_url.as_deref().ok_or(AuthError::NotConfigured)?;
        Ok(format!("{base}{path}"))
    }

    /// `POST /login` with `{email, senha}`.
    pub async fn login(&self, email: &str, senha: &str) -> Result<LoginSession, AuthError> {
        let response = self
            .http
            .post(self.endpoint("/login")?)
            .json(&serde_json::json!({ "email": email, "senha": senha }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let reason = error_message(&body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(AuthError::Rejected(reason));
        }

        let parsed: LoginResponse = serde_json::from_str(&body)?;
        Ok(LoginSession {
            email: parsed.usuario.email,
            token: parsed.value.token,
            expiration: parsed.value.expiration,
        })
    }

    /// `POST /logout`. The token travels as the `token` cookie.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.endpoint("/logout")?)
            .header(reqwest::header::COOKIE, format!("token={token}"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = error_message(&body).unwrap_or_else(|| "Erro ao sair".to_string());
            return Err(AuthError::Rejected(reason));
        }
        Ok(())
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.endpoint(&self.register_path)?)
            .json(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason =
                error_message(&body).unwrap_or_else(|| "Erro ao cadastrar usuário".to_string());
            return Err(AuthError::Rejected(reason));
        }
        Ok(())
    }
}

/// Pull `erro` (or `message`) out of an error body, if it is JSON.
fn error_message(body: &str) -> Option<String> {
    let data: Value = serde_json::from_str(body).ok()?;
    ["erro", "message"]
        .iter()
        .filter_map(|field| data.get(*field))
        .find_map(|value| value.as_str())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> AuthClient {
        AuthClient::new(Some(format!("{}/", server.uri())), DEFAULT_REGISTER_PATH)
    }

    #[tokio::test]
    async fn login_returns_token_and_email() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(serde_json::json!({ "email": "a@b.com", "senha": "segredo" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "usuario": { "email": "a@b.com", "nome": "Ana" },
                "value": { "token": "tok", "expiration": "2030-01-01T00:00:00Z" }
            })))
            .mount(&server)
            .await;

        let session = client_for(&server).login("a@b.com", "segredo").await.unwrap();
        assert_eq!(session.email, "a@b.com");
        assert_eq!(session.token, "tok");
        assert_eq!(session.expiration, "2030-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn login_rejection_carries_erro_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({ "erro": "Senha incorreta" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).login("a@b.com", "errada").await.unwrap_err();
        assert!(matches!(err, AuthError::Rejected(ref reason) if reason == "Senha incorreta"));
    }

    #[tokio::test]
    async fn logout_sends_token_cookie() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/logout"))
            .and(header("cookie", "token=tok"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).logout("tok").await.unwrap();
    }

    #[tokio::test]
    async fn logout_failure_defaults_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/logout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).logout("tok").await.unwrap_err();
        assert_eq!(err.to_string(), "Erro ao sair");
    }

    #[tokio::test]
    async fn register_posts_form_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/usuarios"))
            .and(body_json(serde_json::json!({
                "nome": "Ana",
                "email": "a@b.com",
                "telefone": "11999990000",
                "senha": "segredo"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let form = RegisterForm {
            nome: "Ana".to_string(),
            email: "a@b.com".to_string(),
            telefone: "11999990000".to_string(),
            senha: "segredo".to_string(),
        };
        client_for(&server).register(&form).await.unwrap();
    }

    #[tokio::test]
    async fn missing_base_url_is_not_configured() {
        let client = AuthClient::new(None, DEFAULT_REGISTER_PATH);
        let err = client.login("a@b.com", "segredo").await.unwrap_err();
        assert!(matches!(err, AuthError::NotConfigured));
    }

    #[test]
    fn error_message_prefers_erro() {
        assert_eq!(
            error_message(r#"{"message":"m","erro":"e"}"#).as_deref(),
            Some("e")
        );
        assert_eq!(error_message(r#"{"message":"m"}"#).as_deref(), Some("m"));
        assert_eq!(error_message("not json"), None);
    }
}
