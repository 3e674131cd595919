use eframe::egui;

use crate::common::{ChatMessage, Role};

const USER_COLOR: egui::Color32 = egui::Color32::from_rgb(16, 185, 129);
const BOT_COLOR: egui::Color32 = egui::Color32::from_rgb(30, 41, 59);

pub fn render(ui: &mut egui::Ui, messages: &[ChatMessage], sending: bool) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .max_height((ui.available_height() - 80.0).max(120.0))
        .show(ui, |ui| {
            if messages.is_empty() && !sending {
                render_empty_state(ui);
                return;
            }

            for message in messages {
                render_message(ui, message);
            }

            if sending {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(
                        egui::RichText::new("Gerando resposta para a sua pergunta…")
                            .italics()
                            .weak(),
                    );
                });
            }
        });
}

fn render_empty_state(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label("Comece perguntando algo como \"Explique meu funil de vendas de hoje\".");
        ui.label(
            egui::RichText::new("Pressione Enter para enviar, Shift + Enter para quebrar linha.")
                .small()
                .weak(),
        );
    });
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage) {
    let (layout, fill) = match message.role {
        Role::User => (egui::Layout::right_to_left(egui::Align::TOP), USER_COLOR),
        Role::Bot => (egui::Layout::left_to_right(egui::Align::TOP), BOT_COLOR),
    };

    ui.with_layout(layout, |ui| {
        if message.role == Role::Bot {
            ui.label(egui::RichText::new("IA").strong());
        }
        egui::Frame::group(ui.style()).fill(fill).show(ui, |ui| {
            ui.set_max_width(ui.available_width() * 0.8);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&message.content).color(egui::Color32::WHITE));
                ui.label(egui::RichText::new(&message.created_at).small().weak());
            });
        });
    });
    ui.add_space(6.0);
}
