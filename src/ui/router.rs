use crate::ui::event::UiAction;
use crate::ui::response::ScreenId;
use crate::ui::screens::{self, ScreenView};
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenRenderer {
    Home,
    Gallery,
    AtelierHub,
    Atelier,
    Souvenirs,
    Projection,
    Chat,
    /// Layout plus response-driven extras; also catches unknown screens.
    Generic,
}

/// Total mapping from screen id to renderer.
pub fn route(screen: &ScreenId) -> ScreenRenderer {
    match screen {
        ScreenId::Home => ScreenRenderer::Home,
        ScreenId::Gallery => ScreenRenderer::Gallery,
        ScreenId::AtelierHub => ScreenRenderer::AtelierHub,
        ScreenId::Atelier | ScreenId::Game => ScreenRenderer::Atelier,
        ScreenId::Souvenirs => ScreenRenderer::Souvenirs,
        ScreenId::Projection => ScreenRenderer::Projection,
        ScreenId::Chat => ScreenRenderer::Chat,
        ScreenId::ArtworkDetail
        | ScreenId::Quotes
        | ScreenId::Result
        | ScreenId::Heritage
        | ScreenId::Unknown(_) => ScreenRenderer::Generic,
    }
}

pub fn render(
    renderer: ScreenRenderer,
    ui: &mut egui::Ui,
    view: &mut ScreenView<'_>,
    emit: &mut dyn FnMut(UiAction),
) {
    match renderer {
        ScreenRenderer::Home => screens::home::show(ui, view, emit),
        ScreenRenderer::Gallery => screens::gallery::show(ui, view, emit),
        ScreenRenderer::AtelierHub => screens::atelier_hub::show(ui, view, emit),
        ScreenRenderer::Atelier => screens::atelier::show(ui, view, emit),
        ScreenRenderer::Souvenirs => screens::souvenirs::show(ui, view, emit),
        ScreenRenderer::Projection => screens::projection::show(ui, view, emit),
        ScreenRenderer::Chat => screens::chat::show(ui, view, emit),
        ScreenRenderer::Generic => screens::generic::show(ui, view, emit),
    }
}
