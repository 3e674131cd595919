use eframe::egui;

use crate::ui::state::{AppState, Screen};

/// What the user did on an auth screen this frame.
#[derive(Debug, Default)]
pub struct FormActions {
    pub submit: bool,
    pub go_to: Option<Screen>,
}

fn field(ui: &mut egui::Ui, label: &str, value: &mut String, password: bool, error: Option<&str>) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).password(password));
    if let Some(error) = error {
        ui.colored_label(egui::Color32::from_rgb(252, 165, 165), error);
    }
    ui.add_space(4.0);
}

fn submit_button(ui: &mut egui::Ui, label: &str, pending: bool) -> bool {
    ui.horizontal(|ui| {
        let clicked = ui.add_enabled(!pending, egui::Button::new(label)).clicked();
        if pending {
            ui.spinner();
        }
        clicked
    })
    .inner
}

pub fn render_login(ui: &mut egui::Ui, state: &mut AppState) -> FormActions {
    let mut actions = FormActions::default();
    ui.heading("Bem‑vindo de volta");
    ui.label(egui::RichText::new("Acesse o painel do chat conectado ao n8n.").weak());
    ui.separator();

    let email_error = state.field_error("email");
    let senha_error = state.field_error("senha");
    field(ui, "E-mail", &mut state.login_form.email, false, email_error);
    field(ui, "Senha", &mut state.login_form.senha, true, senha_error);

    actions.submit = submit_button(ui, "Entrar", state.auth_pending);
    ui.horizontal(|ui| {
        if ui.link("Esqueceu a senha?").clicked() {
            actions.go_to = Some(Screen::ForgotPassword);
        }
        if ui.link("Criar conta").clicked() {
            actions.go_to = Some(Screen::Register);
        }
    });
    actions
}

pub fn render_register(ui: &mut egui::Ui, state: &mut AppState) -> FormActions {
    let mut actions = FormActions::default();
    ui.heading("Criar conta");
    ui.separator();

    let errors = ["nome", "email", "telefone", "senha"].map(|name| state.field_error(name));
    let form = &mut state.register_form;
    field(ui, "Nome", &mut form.nome, false, errors[0]);
    field(ui, "E-mail", &mut form.email, false, errors[1]);
    field(ui, "Telefone", &mut form.telefone, false, errors[2]);
    field(ui, "Senha", &mut form.senha, true, errors[3]);

    actions.submit = submit_button(ui, "Cadastrar", state.auth_pending);
    if ui.link("Já tem conta? Entrar").clicked() {
        actions.go_to = Some(Screen::Login);
    }
    actions
}

pub fn render_forgot_password(ui: &mut egui::Ui, state: &mut AppState) -> FormActions {
    let mut actions = FormActions::default();
    ui.heading("Esqueceu a senha?");
    ui.label(egui::RichText::new("Informe seu e-mail para receber um link de redefinição.").weak());
    ui.separator();

    let email_error = state.field_error("email");
    field(ui, "E-mail", &mut state.forgot_form.email, false, email_error);

    if state.reset_sent {
        ui.colored_label(
            egui::Color32::from_rgb(52, 211, 153),
            "Se o e-mail estiver cadastrado, você receberá um link em instantes.",
        );
    }

    actions.submit = submit_button(ui, "Enviar link", state.auth_pending);
    if ui.link("Voltar ao login").clicked() {
        actions.go_to = Some(Screen::Login);
    }
    actions
}
