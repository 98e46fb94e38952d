use crate::catalog::Artwork;
use crate::ui::event::UiAction;
use crate::ui::response::ScreenId;
use crate::ui::screens::gallery::swatch_strip;
use crate::ui::screens::{layout, ScreenView};
use eframe::egui::{self, RichText};

/// Shared layout plus whatever the response content calls for: artwork
/// notes for `detail_oeuvre`, the heritage module for `heritage`.
pub fn show(ui: &mut egui::Ui, view: &mut ScreenView<'_>, emit: &mut dyn FnMut(UiAction)) {
    layout(ui, view, emit, |ui, view, emit| match &view.response.screen {
        ScreenId::ArtworkDetail => {
            let artwork = view
                .response
                .context
                .artwork_id
                .as_deref()
                .and_then(|id| view.catalogue.find(id));
            match artwork {
                Some(artwork) => artwork_detail(ui, view, artwork),
                None => tracing::debug!(
                    artwork_id = view.response.context.artwork_id.as_deref(),
                    "artwork detail without a catalogue entry"
                ),
            }
        }
        ScreenId::Heritage => heritage(ui, view, emit),
        _ => {}
    });
}

fn artwork_detail(ui: &mut egui::Ui, view: &ScreenView<'_>, artwork: &Artwork) {
    let theme = view.theme;
    egui::ScrollArea::vertical()
        .id_salt("artwork_detail")
        .show(ui, |ui| {
            ui.label(
                RichText::new(format!("{} · {}", artwork.kind.label(), artwork.energy))
                    .color(theme.text_muted),
            );
            swatch_strip(ui, &artwork.palette, 28.0);
            ui.label(RichText::new(&artwork.pitch).size(20.0));
            ui.add_space(theme.spacing_8);
            theme.card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new("Le mot de Marcelle")
                        .strong()
                        .size(20.0)
                        .color(theme.highlight),
                );
                ui.label(RichText::new(format!("“{}”", artwork.quote)).italics());
            });
            theme.card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new("Pont avec la science (20s)")
                        .strong()
                        .size(20.0)
                        .color(theme.voice),
                );
                ui.label(&artwork.science_bridge);
            });
        });
}

fn heritage(ui: &mut egui::Ui, view: &ScreenView<'_>, emit: &mut dyn FnMut(UiAction)) {
    let theme = view.theme;
    let module = &view.catalogue.heritage;
    theme.card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(&module.video.title).strong().size(22.0));
        ui.label(
            RichText::new(format!("Vidéo · {}", module.video.target_duration))
                .color(theme.text_muted),
        );
        ui.label(RichText::new(&module.video.caption).italics());
    });
    ui.add_space(theme.spacing_12);
    ui.horizontal_wrapped(|ui| {
        for button in &module.buttons {
            let label = format!("{}\n{}", button.label, button.microcopy);
            if ui
                .add_enabled(!view.loading, theme.chip_button(&label))
                .clicked()
            {
                emit(UiAction::Submit(button.label.clone()));
            }
        }
    });
    ui.add_space(theme.spacing_12);
    if ui
        .add_enabled(!view.loading, theme.primary_button(&module.final_cta.label))
        .clicked()
    {
        emit(UiAction::Submit(module.final_cta.label.clone()));
    }
}
