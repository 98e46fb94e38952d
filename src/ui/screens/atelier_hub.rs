use crate::ui::event::UiAction;
use crate::ui::screens::{action_card, layout, ScreenView};
use eframe::egui;

const STYLES: [(&str, &str, &str); 2] = [
    (
        "Vitrail",
        "Assemble des formes et joue avec la lumière.",
        "Je veux créer en style vitrail",
    ),
    (
        "Peinture",
        "Peins librement au doigt.",
        "Je veux créer en style peinture",
    ),
];

pub fn show(ui: &mut egui::Ui, view: &mut ScreenView<'_>, emit: &mut dyn FnMut(UiAction)) {
    layout(ui, view, emit, |ui, view, emit| {
        let theme = view.theme;
        let gap = theme.spacing_24;
        let width = ((ui.available_width() - gap) / 2.0).max(200.0);
        let size = egui::vec2(width, 240.0);
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = gap;
            for (title, subtitle, message) in STYLES {
                if action_card(ui, theme, title, subtitle, !view.loading, size) {
                    emit(UiAction::Submit(message.to_string()));
                }
            }
        });
    });
}
