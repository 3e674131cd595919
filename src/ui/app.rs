use std::time::{Duration, Instant};

use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{NetworkCommand, NetworkEvent};
use crate::storage::KeyValueStore;

use super::components::{
    auth_forms::{self, FormActions},
    chat_area, dashboard, input_bar,
    navbar::{self, NavAction},
    notices,
};
use super::state::{AppState, Screen};

const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

pub struct ChatApp {
    state: AppState,
    store: Box<dyn KeyValueStore>,
    command_sender: mpsc::Sender<NetworkCommand>,
    event_receiver: mpsc::Receiver<NetworkEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        store: Box<dyn KeyValueStore>,
        command_sender: mpsc::Sender<NetworkCommand>,
        event_receiver: mpsc::Receiver<NetworkEvent>,
    ) -> Self {
        let mut state = AppState::new();
        match state.chat.bootstrap_session_id(store.as_ref()) {
            Ok(session_id) => log::info!("Chat session id: {session_id}"),
            // Submissions stay disabled until a session id exists.
            Err(err) => log::error!("Failed to resolve chat session id: {err}"),
        }
        state.restore_login(store.as_ref(), chrono::Utc::now());

        Self {
            state,
            store,
            command_sender,
            event_receiver,
        }
    }

    fn handle_network_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.apply_event(event, self.store.as_ref());
        }
    }

    fn send_command(&mut self, command: NetworkCommand) -> bool {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to network: {err}");
            return false;
        }
        true
    }

    fn submit_chat(&mut self) {
        let sender = &self.command_sender;
        self.state.submit_chat(|command| match sender.try_send(command) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Failed to send command to network: {err}");
                false
            }
        });
    }

    fn submit_auth(&mut self, command: Option<NetworkCommand>) {
        if let Some(command) = command {
            if !self.send_command(command) {
                self.state.command_rejected();
            }
        }
    }

    fn handle_form_actions(&mut self, actions: FormActions, screen: Screen) {
        if let Some(target) = actions.go_to {
            self.state.navigate(target);
            return;
        }
        if !actions.submit {
            return;
        }
        let command = match screen {
            Screen::Login => self.state.begin_login(),
            Screen::Register => self.state.begin_register(),
            Screen::ForgotPassword => self.state.begin_forgot_password(),
            Screen::Chat | Screen::Dashboard => None,
        };
        self.submit_auth(command);
    }

    fn handle_nav(&mut self, action: NavAction) {
        match action {
            NavAction::Go(screen) => self.state.navigate(screen),
            NavAction::Logout => {
                let command = self.state.begin_logout(self.store.as_ref());
                if let Some(command) = command {
                    if !self.send_command(command) {
                        self.state.apply_event(
                            NetworkEvent::LoggedOut {
                                error: Some("Serviço de rede indisponível".to_string()),
                            },
                            self.store.as_ref(),
                        );
                    }
                }
            }
        }
    }

    fn render_chat(&mut self, ui: &mut egui::Ui) {
        let sending = self.state.chat.is_sending();
        ui.horizontal(|ui| {
            ui.heading("Chat IA • n8n Webhook");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let status = if sending { "Gerando resposta..." } else { "Online" };
                ui.label(egui::RichText::new(status).small());
            });
        });
        ui.separator();

        chat_area::render(ui, self.state.chat.transcript(), sending);
        ui.separator();

        let can_send = self.state.chat.can_submit(&self.state.input_text);
        if input_bar::render(ui, &mut self.state.input_text, can_send, sending) {
            self.submit_chat();
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_network_events();
        self.state.tick(Instant::now());

        egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
            let logged_in_as = self.state.logged_in_as.clone();
            if let Some(action) = navbar::render(ui, self.state.screen, logged_in_as.as_deref()) {
                self.handle_nav(action);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            notices::render(ui, &self.state.notices);

            let screen = self.state.screen;
            match screen {
                Screen::Chat => self.render_chat(ui),
                Screen::Dashboard => {
                    dashboard::render(ui, self.state.logged_in_as.as_deref());
                }
                Screen::Login => {
                    let actions = auth_forms::render_login(ui, &mut self.state);
                    self.handle_form_actions(actions, screen);
                }
                Screen::Register => {
                    let actions = auth_forms::render_register(ui, &mut self.state);
                    self.handle_form_actions(actions, screen);
                }
                Screen::ForgotPassword => {
                    let actions = auth_forms::render_forgot_password(ui, &mut self.state);
                    self.handle_form_actions(actions, screen);
                }
            }
        });

        // Network events arrive between frames.
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
