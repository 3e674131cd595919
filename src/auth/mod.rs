pub mod forms;

pub use forms::{FieldError, ForgotPasswordForm, LoginForm, RegisterForm};
