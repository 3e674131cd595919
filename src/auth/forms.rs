use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// One failed field and the message shown under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

pub type Validation = Result<(), Vec<FieldError>>;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

fn finish(errors: Vec<FieldError>) -> Validation {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub senha: String,
}

impl LoginForm {
    pub fn validate(&self) -> Validation {
        let mut errors = Vec::new();
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "Por favor, insira um email válido."));
        }
        if self.senha.chars().count() < 6 {
            errors.push(FieldError::new("senha", "A senha deve ter no mínimo 6 caracteres."));
        }
        finish(errors)
    }
}

/// Body of the registration request as well as the screen's form state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterForm {
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub senha: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Validation {
        let mut errors = Vec::new();
        if self.nome.chars().count() < 3 {
            errors.push(FieldError::new("nome", "Informe um nome válido"));
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "E-mail inválido"));
        }
        if self.telefone.chars().count() < 8 {
            errors.push(FieldError::new("telefone", "Informe um telefone válido"));
        }
        if self.senha.chars().count() < 6 {
            errors.push(FieldError::new(
                "senha",
                "A senha deve ter pelo menos 6 caracteres",
            ));
        }
        finish(errors)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> Validation {
        if is_valid_email(&self.email) {
            Ok(())
        } else {
            Err(vec![FieldError::new("email", "E-mail inválido")])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_check() {
        assert!(is_valid_email("voce@empresa.com"));
        assert!(is_valid_email(" voce@empresa.com.br "));
        assert!(!is_valid_email("voce@empresa"));
        assert!(!is_valid_email("voce empresa@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn login_reports_both_fields() {
        let form = LoginForm {
            email: "nope".to_string(),
            senha: "123".to_string(),
        };
        let errors = form.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["email", "senha"]);
    }

    #[test]
    fn login_accepts_six_char_password() {
        let form = LoginForm {
            email: "a@b.com".to_string(),
            senha: "123456".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn register_minimum_lengths() {
        let mut form = RegisterForm {
            nome: "Al".to_string(),
            email: "a@b.com".to_string(),
            telefone: "1234567".to_string(),
            senha: "segredo".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("nome", "Informe um nome válido"),
                FieldError::new("telefone", "Informe um telefone válido"),
            ]
        );

        form.nome = "Ana".to_string();
        form.telefone = "12345678".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn forgot_password_needs_email() {
        assert!(ForgotPasswordForm::default().validate().is_err());
        let form = ForgotPasswordForm {
            email: "a@b.com".to_string(),
        };
        assert!(form.validate().is_ok());
    }
}
