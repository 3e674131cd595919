use eframe::egui;

use crate::ui::state::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Go(Screen),
    Logout,
}

pub fn render(ui: &mut egui::Ui, current: Screen, logged_in_as: Option<&str>) -> Option<NavAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Statum • Chat IA").strong());
        ui.label(egui::RichText::new("n8n Webhook integrado").small().weak());
        ui.separator();

        for (name, screen) in [("Chatbot", Screen::Chat), ("Dashboard", Screen::Dashboard)] {
            if ui.selectable_label(current == screen, name).clicked() {
                action = Some(NavAction::Go(screen));
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            match logged_in_as {
                Some(email) => {
                    if ui.button("Sair").clicked() {
                        action = Some(NavAction::Logout);
                    }
                    ui.label(egui::RichText::new(email).weak());
                }
                None => {
                    if ui.selectable_label(current == Screen::Login, "Login").clicked() {
                        action = Some(NavAction::Go(Screen::Login));
                    }
                }
            }
        });
    });

    action
}
