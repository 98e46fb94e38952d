use crate::ui::event::UiAction;
use crate::ui::screens::{action_card, layout, ScreenView};
use eframe::egui;

const CARDS: [(&str, &str, &str); 3] = [
    (
        "Parcours Éclat",
        "Un voyage guidé dans la couleur et la lumière.",
        "Commencer le Parcours Éclat",
    ),
    (
        "Atelier-Jeu",
        "Crée ton propre vitrail ou ta peinture.",
        "Je veux créer",
    ),
    (
        "Galerie",
        "Explore les œuvres de Marcelle.",
        "Je veux voir les œuvres",
    ),
];

pub fn show(ui: &mut egui::Ui, view: &mut ScreenView<'_>, emit: &mut dyn FnMut(UiAction)) {
    layout(ui, view, emit, |ui, view, emit| {
        let theme = view.theme;
        let gap = theme.spacing_16;
        let width = ((ui.available_width() - gap * 2.0) / 3.0).max(160.0);
        let size = egui::vec2(width, 200.0);
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = gap;
            for (title, subtitle, message) in CARDS {
                if action_card(ui, theme, title, subtitle, !view.loading, size) {
                    emit(UiAction::Submit(message.to_string()));
                }
            }
        });
    });
}
