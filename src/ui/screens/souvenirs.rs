use crate::ui::event::UiAction;
use crate::ui::screens::{creation_image, layout, ScreenView};
use eframe::egui::{self, RichText};

const THUMBNAIL: f32 = 180.0;

/// The message that opens creation `index` (0-based) in the projection view.
pub fn projection_request(index: usize) -> String {
    format!("Je veux voir ma création numéro {}", index + 1)
}

pub fn show(ui: &mut egui::Ui, view: &mut ScreenView<'_>, emit: &mut dyn FnMut(UiAction)) {
    layout(ui, view, emit, |ui, view, emit| {
        let theme = view.theme;
        if view.creations.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(theme.spacing_24);
                ui.label(
                    RichText::new("Le mur est encore vide. Crée une œuvre dans l'atelier!")
                        .size(20.0)
                        .color(theme.text_muted),
                );
            });
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt("souvenirs_wall")
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(theme.spacing_12, theme.spacing_12);
                    for (index, uri) in view.creations.iter().enumerate() {
                        let Some(image) = creation_image(index, uri) else {
                            tracing::warn!(index, "creation is not a readable SVG data URI");
                            continue;
                        };
                        let button = egui::ImageButton::new(
                            image.fit_to_exact_size(egui::vec2(THUMBNAIL, THUMBNAIL)),
                        )
                        .corner_radius(egui::CornerRadius::same(theme.radius_12));
                        if ui.add_enabled(!view.loading, button).clicked() {
                            emit(UiAction::Submit(projection_request(index)));
                        }
                    }
                });
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_request_is_one_based() {
        assert_eq!(projection_request(0), "Je veux voir ma création numéro 1");
        assert_eq!(projection_request(4), "Je veux voir ma création numéro 5");
    }
}
