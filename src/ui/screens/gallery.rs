use crate::catalog::Artwork;
use crate::theme::parse_hex_color;
use crate::ui::event::UiAction;
use crate::ui::screens::{layout, ScreenView};
use eframe::egui::{self, RichText};

const COLUMNS: usize = 4;

/// The message that asks the guide about one artwork.
pub fn artwork_request(artwork: &Artwork) -> String {
    format!("Montre-moi l'œuvre \"{}\" (ID: {})", artwork.title, artwork.id)
}

pub fn show(ui: &mut egui::Ui, view: &mut ScreenView<'_>, emit: &mut dyn FnMut(UiAction)) {
    layout(ui, view, emit, |ui, view, emit| {
        let theme = view.theme;
        let gap = theme.spacing_12;
        let width = ((ui.available_width() - gap * (COLUMNS as f32 - 1.0)) / COLUMNS as f32)
            .max(140.0);

        egui::ScrollArea::vertical()
            .id_salt("gallery_grid")
            .show(ui, |ui| {
                egui::Grid::new("gallery")
                    .spacing(egui::vec2(gap, gap))
                    .show(ui, |ui| {
                        for (index, artwork) in view.catalogue.artworks.iter().enumerate() {
                            let response = theme
                                .card_frame()
                                .show(ui, |ui| {
                                    ui.set_width(width - theme.spacing_16 * 2.0);
                                    swatch_strip(ui, &artwork.palette, 18.0);
                                    ui.label(RichText::new(&artwork.title).strong().size(18.0));
                                    ui.label(
                                        RichText::new(artwork.kind.label())
                                            .color(theme.text_muted)
                                            .small(),
                                    );
                                })
                                .response
                                .interact(egui::Sense::click());
                            if response.clicked() && !view.loading {
                                emit(UiAction::Submit(artwork_request(artwork)));
                            }
                            if (index + 1) % COLUMNS == 0 {
                                ui.end_row();
                            }
                        }
                    });
            });
    });
}

/// A row of palette chips.
pub fn swatch_strip(ui: &mut egui::Ui, palette: &[String], size: f32) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 2.0;
        for color in palette {
            let Some(fill) = parse_hex_color(color) else {
                continue;
            };
            let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
            ui.painter().rect_filled(rect, 3.0, fill);
        }
    });
}
