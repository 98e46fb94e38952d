//! One renderer per screen, all sharing [`layout`].

pub mod atelier;
pub mod atelier_hub;
pub mod chat;
pub mod gallery;
pub mod generic;
pub mod home;
pub mod projection;
pub mod souvenirs;

use crate::atelier::export::decode_data_uri;
use crate::atelier::AtelierSession;
use crate::catalog::Catalogue;
use crate::session::ConversationTurn;
use crate::theme::Theme;
use crate::ui::event::UiAction;
use crate::ui::response::NavigationResponse;
use eframe::egui::{self, RichText};

/// Everything a screen may read, plus the few pieces of UI-local state it
/// may edit.
pub struct ScreenView<'a> {
    pub theme: &'a Theme,
    pub response: &'a NavigationResponse,
    pub catalogue: &'a Catalogue,
    pub creations: &'a [String],
    pub transcript: Vec<&'a ConversationTurn>,
    pub atelier: Option<&'a mut AtelierSession>,
    pub chat_input: &'a mut String,
    pub export_error: Option<&'a str>,
    /// Input is disabled while a request is in flight.
    pub loading: bool,
}

/// Narration bubble, heading, body, then chips and the CTA.
pub fn layout<'a>(
    ui: &mut egui::Ui,
    view: &mut ScreenView<'a>,
    emit: &mut dyn FnMut(UiAction),
    body: impl FnOnce(&mut egui::Ui, &mut ScreenView<'a>, &mut dyn FnMut(UiAction)),
) {
    framed(ui, view, emit, true, body);
}

/// [`layout`] without the narration bubble, for screens that show the
/// guide's words in their own body.
pub fn quiet_layout<'a>(
    ui: &mut egui::Ui,
    view: &mut ScreenView<'a>,
    emit: &mut dyn FnMut(UiAction),
    body: impl FnOnce(&mut egui::Ui, &mut ScreenView<'a>, &mut dyn FnMut(UiAction)),
) {
    framed(ui, view, emit, false, body);
}

fn framed<'a>(
    ui: &mut egui::Ui,
    view: &mut ScreenView<'a>,
    emit: &mut dyn FnMut(UiAction),
    show_voice: bool,
    body: impl FnOnce(&mut egui::Ui, &mut ScreenView<'a>, &mut dyn FnMut(UiAction)),
) {
    let theme = view.theme;
    if show_voice && !view.response.voice.is_empty() {
        theme.bubble_frame().show(ui, |ui| {
            ui.label(
                RichText::new(format!("“{}”", view.response.voice))
                    .italics()
                    .size(20.0)
                    .color(theme.voice),
            );
        });
    }
    ui.add_space(theme.spacing_8);
    if !view.response.on_screen.is_empty() {
        ui.heading(RichText::new(&view.response.on_screen).strong());
    }
    ui.add_space(theme.spacing_8);

    let body_height = (ui.available_height() - theme.footer_height).max(160.0);
    ui.allocate_ui(egui::vec2(ui.available_width(), body_height), |ui| {
        ui.set_min_height(body_height);
        body(ui, view, emit);
    });

    ui.separator();
    footer(ui, view, emit);
}

fn footer(ui: &mut egui::Ui, view: &ScreenView<'_>, emit: &mut dyn FnMut(UiAction)) {
    let theme = view.theme;
    if view.loading {
        ui.horizontal_centered(|ui| {
            ui.spinner();
            ui.label(RichText::new("Marcelle réfléchit…").color(theme.text_muted));
        });
        return;
    }

    ui.horizontal_wrapped(|ui| {
        for chip in &view.response.chips {
            if ui.add(theme.chip_button(chip)).clicked() {
                emit(UiAction::Submit(chip.clone()));
            }
        }
        if let Some(cta) = &view.response.cta {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add(theme.primary_button(&cta.label)).clicked() {
                    emit(UiAction::Submit(cta.label.clone()));
                }
            });
        }
    });
}

/// A large tappable card; returns true when tapped.
pub fn action_card(
    ui: &mut egui::Ui,
    theme: &Theme,
    title: &str,
    subtitle: &str,
    enabled: bool,
    size: egui::Vec2,
) -> bool {
    let text = RichText::new(format!("{title}\n{subtitle}")).size(20.0);
    let button = egui::Button::new(text)
        .fill(theme.surface_1)
        .stroke(egui::Stroke::new(1.0, theme.border_subtle))
        .corner_radius(egui::CornerRadius::same(theme.radius_16))
        .min_size(size);
    ui.add_enabled(enabled, button).clicked()
}

/// An exported creation as an image widget, via the SVG loader.
pub fn creation_image(index: usize, data_uri: &str) -> Option<egui::Image<'static>> {
    let bytes = decode_data_uri(data_uri)?;
    Some(egui::Image::from_bytes(
        format!("bytes://creation-{index}.svg"),
        bytes,
    ))
}
