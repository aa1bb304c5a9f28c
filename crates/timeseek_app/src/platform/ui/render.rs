use eframe::egui;
use timeseek_core::{AppViewModel, Msg, Role};

use super::constants::*;

/// Draws the panel and returns the messages produced by user input this frame.
///
/// `input` is the text box buffer; `scroll_to_latest` is consumed once the
/// transcript has been scrolled to its last line.
pub fn render(
    ctx: &egui::Context,
    view: &AppViewModel,
    input: &mut String,
    scroll_to_latest: &mut bool,
) -> Vec<Msg> {
    let mut msgs = Vec::new();

    egui::TopBottomPanel::bottom(INPUT_PANEL_ID).show(ctx, |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let edit_width =
                ui.available_width() - SEND_BUTTON_WIDTH - ui.spacing().item_spacing.x;
            let response = ui.add(
                egui::TextEdit::singleline(input)
                    .hint_text(INPUT_HINT)
                    .desired_width(edit_width.max(0.0)),
            );
            if response.changed() {
                msgs.push(Msg::InputChanged(input.clone()));
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                msgs.push(Msg::EnterPressed);
                response.request_focus();
            }

            let send = ui.add_enabled(
                view.send_enabled,
                egui::Button::new(SEND_LABEL).min_size(egui::vec2(SEND_BUTTON_WIDTH, 0.0)),
            );
            if send.clicked() {
                msgs.push(Msg::SendClicked);
            }
        });
        ui.add_space(6.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &view.lines {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(role_label(line.role)).strong());
                        ui.label(line.text.as_str());
                    });
                }
                if std::mem::take(scroll_to_latest) {
                    ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                }
            });
    });

    msgs
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => USER_LABEL,
        Role::System => SYSTEM_LABEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_prefixed_by_role() {
        assert_eq!(role_label(Role::User), "You:");
        assert_eq!(role_label(Role::System), "AI:");
    }
}
