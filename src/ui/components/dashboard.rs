use eframe::egui;

pub fn render(ui: &mut egui::Ui, logged_in_as: Option<&str>) {
    ui.heading("Dashboard");
    ui.separator();
    if let Some(email) = logged_in_as {
        ui.label(format!("Conectado como {email}"));
    }
    ui.label("Aqui você pode colocar métricas, histórico de conversas, funil, etc.");
}
