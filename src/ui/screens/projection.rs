use crate::ui::event::UiAction;
use crate::ui::screens::{creation_image, ScreenView};
use eframe::egui::{self, RichText};

pub const BACK_TO_WALL: &str = "Retour au mur des souvenirs";

/// The creation the response points at, if it exists.
pub fn selected_creation(creations: &[String], index: Option<usize>) -> Option<(usize, &str)> {
    let index = index?;
    creations.get(index).map(|uri| (index, uri.as_str()))
}

/// Full-screen view of one creation; no narration or chips.
pub fn show(ui: &mut egui::Ui, view: &mut ScreenView<'_>, emit: &mut dyn FnMut(UiAction)) {
    let theme = view.theme;
    let selected = selected_creation(view.creations, view.response.context.creation_index);
    let image = selected.and_then(|(index, uri)| creation_image(index, uri));

    let Some(image) = image else {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.heading("Oups !");
            ui.label(
                RichText::new("Nous n'avons pas pu trouver cette création.")
                    .color(theme.text_muted),
            );
            ui.add_space(theme.spacing_16);
            if ui
                .add_enabled(!view.loading, theme.primary_button("Retour aux souvenirs"))
                .clicked()
            {
                emit(UiAction::Submit(BACK_TO_WALL.to_string()));
            }
        });
        return;
    };

    let full = ui.available_rect_before_wrap();
    ui.painter().rect_filled(full, 0.0, egui::Color32::BLACK);
    let side = full.width().min(full.height());
    let frame = egui::Rect::from_center_size(full.center(), egui::vec2(side, side));
    ui.put(frame, image.fit_to_exact_size(frame.size()));

    if !view.loading {
        let back = egui::Rect::from_min_size(
            full.min + egui::vec2(theme.spacing_16, theme.spacing_16),
            egui::vec2(64.0, 64.0),
        );
        let button = egui::Button::new(RichText::new("←").size(28.0))
            .fill(egui::Color32::from_black_alpha(128))
            .corner_radius(egui::CornerRadius::same(32));
        if ui.put(back, button).clicked() {
            emit(UiAction::Submit(BACK_TO_WALL.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_or_missing_index_selects_nothing() {
        let creations = vec!["a".to_string(), "b".to_string()];
        assert_eq!(selected_creation(&creations, Some(1)), Some((1, "b")));
        assert_eq!(selected_creation(&creations, Some(2)), None);
        assert_eq!(selected_creation(&creations, None), None);
        assert_eq!(selected_creation(&[], Some(0)), None);
    }
}
