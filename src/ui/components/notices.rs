use eframe::egui;

use crate::ui::state::{Notice, NoticeKind};

pub fn render(ui: &mut egui::Ui, notices: &[Notice]) {
    for notice in notices {
        let color = match notice.kind {
            NoticeKind::Success => egui::Color32::from_rgb(52, 211, 153),
            NoticeKind::Error => egui::Color32::from_rgb(252, 165, 165),
        };
        ui.colored_label(color, &notice.text);
    }
}
