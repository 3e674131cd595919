use eframe::egui;

/// Multi-line input: Enter sends, Shift+Enter breaks the line.
///
/// Returns true when the user asked to send, by key or by button.
pub fn render(ui: &mut egui::Ui, input_text: &mut String, can_send: bool, sending: bool) -> bool {
    let mut send = false;
    let input_id = ui.make_persistent_id("chat_input");

    // Enter has to be taken before the TextEdit sees it, or it becomes a newline.
    let has_focus = ui.memory(|memory| memory.has_focus(input_id));
    let shift_held = ui.input(|input| input.modifiers.shift);
    if has_focus
        && !shift_held
        && ui.input_mut(|input| input.consume_key(egui::Modifiers::NONE, egui::Key::Enter))
    {
        send = true;
    }

    ui.horizontal(|ui| {
        ui.add(
            egui::TextEdit::multiline(input_text)
                .id(input_id)
                .desired_rows(2)
                .desired_width((ui.available_width() - 90.0).max(120.0))
                .hint_text("Digite sua mensagem..."),
        );

        let label = if sending { "Gerando…" } else { "Enviar" };
        if ui.add_enabled(can_send, egui::Button::new(label)).clicked() {
            send = true;
        }
    });

    send
}
