use crate::session::Role;
use crate::ui::event::UiAction;
use crate::ui::screens::{quiet_layout, ScreenView};
use eframe::egui::{self, Align, Layout, RichText, ScrollArea};

pub fn show(ui: &mut egui::Ui, view: &mut ScreenView<'_>, emit: &mut dyn FnMut(UiAction)) {
    quiet_layout(ui, view, emit, |ui, view, emit| {
        let theme = view.theme;
        ui.label(
            RichText::new(
                "Pose une question simple sur mon art, mes souvenirs, la couleur ou la lumière.",
            )
            .color(theme.text_muted),
        );
        ui.add_space(theme.spacing_8);

        let transcript_height = (ui.available_height() - 80.0).max(120.0);
        ScrollArea::vertical()
            .id_salt("chat_transcript")
            .max_height(transcript_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if view.transcript.is_empty() && !view.response.voice.is_empty() {
                    bubble(ui, view, Role::Assistant, &view.response.voice);
                }
                for turn in &view.transcript {
                    bubble(ui, view, turn.role, &turn.text);
                }
                if view.loading {
                    ui.spinner();
                }
            });

        ui.add_space(theme.spacing_8);
        let mut send_now = false;
        ui.horizontal(|ui| {
            let hint = if view.loading {
                "Marcelle réfléchit…"
            } else {
                "Écris ta question ici..."
            };
            let response = ui.add_enabled(
                !view.loading,
                egui::TextEdit::singleline(&mut *view.chat_input)
                    .desired_width(ui.available_width() - 140.0)
                    .hint_text(hint),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                send_now = true;
            }
            let can_send = !view.loading && !view.chat_input.trim().is_empty();
            send_now |= ui
                .add_enabled(can_send, theme.primary_button("Envoyer"))
                .clicked();
        });

        if send_now && !view.loading {
            let message = view.chat_input.trim().to_string();
            if !message.is_empty() {
                view.chat_input.clear();
                emit(UiAction::Submit(message));
            }
        }
    });
}

fn bubble(ui: &mut egui::Ui, view: &ScreenView<'_>, role: Role, text: &str) {
    let theme = view.theme;
    let (layout, fill, color) = match role {
        Role::User => (Layout::right_to_left(Align::TOP), theme.text_primary, theme.surface_0),
        Role::Assistant => (Layout::left_to_right(Align::TOP), theme.surface_1, theme.text_primary),
    };
    ui.with_layout(layout, |ui| {
        let max_width = ui.available_width() * 0.78;
        theme.panel_frame(fill, theme.spacing_12 as i8).show(ui, |ui| {
            ui.set_max_width(max_width);
            ui.label(RichText::new(text).color(color));
        });
    });
}
