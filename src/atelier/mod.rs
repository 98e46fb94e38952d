//! The atelier: a two-mode creative canvas.
//!
//! An [`AtelierSession`] lives exactly as long as the atelier screen is shown.
//! Only the exported artifact produced by [`AtelierSession::finish`] survives
//! it.

pub mod export;
pub mod geometry;
pub mod gesture;
pub mod model;

use crate::catalog::{Artwork, Catalogue};
use crate::ui::response::NavigationResponse;
use eframe::egui::Pos2;
use export::{render_svg, to_data_uri, ExportError, ExportStyle};
use geometry::{map_pointer, SurfaceTransform};
use gesture::{GestureOutcome, InteractionController, PointerEvent, PointerId};
use model::{DrawingModel, ElementId, LineCap, Reorder, ShapeKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::RangeInclusive;
use std::time::Duration;

pub const DEFAULT_PALETTE: [&str; 6] = [
    "#EF4444", "#3B82F6", "#FACC15", "#22C55E", "#000000", "#FFFFFF",
];
pub const BRUSH_SIZES: [(&str, f32); 3] = [("Fin", 0.5), ("Moyen", 1.0), ("Large", 2.0)];
pub const BRUSH_SHAPES: [(&str, LineCap); 2] =
    [("Rond", LineCap::Round), ("Carré", LineCap::Square)];
pub const LIGHT_RANGE: RangeInclusive<f32> = 0.2..=1.0;
pub const DEFAULT_LIGHT: f32 = 0.75;
pub const GLASS_BACKDROP: &str = "#F3F4F6";
pub const PAPER_BACKDROP: &str = "#FFFFFF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreativeMode {
    /// "vitrail": shapes that can be dragged and layered.
    Geometric,
    /// "peinture": freehand strokes.
    Freehand,
}

impl CreativeMode {
    /// Anything but an explicit painting hint opens the stained-glass mode.
    pub fn from_hint(hint: Option<&str>) -> Self {
        Self::explicit(hint).unwrap_or(Self::Geometric)
    }

    /// Only `vitrail` and `peinture` name a mode; `parcours`, `libre` and
    /// anything else do not.
    pub fn explicit(hint: Option<&str>) -> Option<Self> {
        match hint?.trim().to_lowercase().as_str() {
            "vitrail" => Some(Self::Geometric),
            "peinture" => Some(Self::Freehand),
            _ => None,
        }
    }

    pub fn as_hint(&self) -> &'static str {
        match self {
            Self::Geometric => "vitrail",
            Self::Freehand => "peinture",
        }
    }

    fn default_challenge(&self) -> &'static str {
        match self {
            Self::Geometric => "Crée un vitrail géométrique!",
            Self::Freehand => "Peins une toile expressive!",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub color: String,
    pub brush_size: f32,
    pub brush_shape: LineCap,
    /// Light intensity shining through the glass; drives shape fill opacity.
    pub light: f32,
}

impl ToolSettings {
    pub fn new(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            brush_size: BRUSH_SIZES[1].1,
            brush_shape: LineCap::Round,
            light: DEFAULT_LIGHT,
        }
    }
}

pub struct AtelierSession {
    mode: CreativeMode,
    artwork_id: Option<String>,
    palette: Vec<String>,
    challenge: Vec<String>,
    tools: ToolSettings,
    model: DrawingModel,
    controller: InteractionController,
    surface: Option<SurfaceTransform>,
    /// Device position of the most recent pointer event, kept across frames.
    last_pointer: Option<Pos2>,
    rng: StdRng,
}

impl AtelierSession {
    pub fn new(mode: CreativeMode, artwork: Option<&Artwork>) -> Self {
        let palette: Vec<String> = match artwork {
            Some(artwork) if !artwork.palette.is_empty() => artwork.palette.clone(),
            _ => DEFAULT_PALETTE.iter().map(|color| color.to_string()).collect(),
        };
        let challenge = match artwork {
            Some(artwork) if !artwork.challenge.is_empty() => artwork.challenge.clone(),
            _ => vec![mode.default_challenge().to_string()],
        };
        let first_color = palette
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_PALETTE[0].to_string());

        Self {
            mode,
            artwork_id: artwork.map(|artwork| artwork.id.clone()),
            palette,
            challenge,
            tools: ToolSettings::new(first_color),
            model: DrawingModel::new(),
            controller: InteractionController::new(),
            surface: None,
            last_pointer: None,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_response(response: &NavigationResponse, catalogue: &Catalogue) -> Self {
        let mode = CreativeMode::from_hint(response.context.mode.as_deref());
        let artwork = match response.context.artwork_id.as_deref() {
            Some(id) => {
                let artwork = catalogue.find(id);
                if artwork.is_none() {
                    tracing::warn!(artwork_id = id, "atelier opened with unknown artwork");
                }
                artwork
            }
            None => None,
        };
        tracing::debug!(
            mode = mode.as_hint(),
            artwork_id = artwork.map(|artwork| artwork.id.as_str()),
            "atelier session created"
        );
        Self::new(mode, artwork)
    }

    pub fn mode(&self) -> CreativeMode {
        self.mode
    }

    pub fn artwork_id(&self) -> Option<&str> {
        self.artwork_id.as_deref()
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    pub fn challenge(&self) -> &[String] {
        &self.challenge
    }

    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    pub fn model(&self) -> &DrawingModel {
        &self.model
    }

    pub fn is_gesture_active(&self) -> bool {
        !self.controller.is_idle()
    }

    pub fn surface(&self) -> Option<&SurfaceTransform> {
        self.surface.as_ref()
    }

    /// Records where the canvas was laid out this frame; `None` while the
    /// canvas is not on screen.
    pub fn set_surface(&mut self, surface: Option<SurfaceTransform>) {
        self.surface = surface;
    }

    pub fn select_color(&mut self, color: &str) {
        self.tools.color = color.to_string();
    }

    pub fn set_brush_size(&mut self, size: f32) {
        if size.is_finite() && size > 0.0 {
            self.tools.brush_size = size;
        }
    }

    pub fn set_brush_shape(&mut self, shape: LineCap) {
        self.tools.brush_shape = shape;
    }

    pub fn set_light(&mut self, light: f32) {
        self.tools.light = light.clamp(*LIGHT_RANGE.start(), *LIGHT_RANGE.end());
    }

    pub fn add_shape(&mut self, kind: ShapeKind) -> Option<ElementId> {
        if self.mode != CreativeMode::Geometric {
            return None;
        }
        Some(
            self.model
                .add_shape(kind, self.tools.color.clone(), &mut self.rng),
        )
    }

    pub fn delete_selected(&mut self) -> bool {
        self.model.delete_selected().is_some()
    }

    pub fn reorder_selected(&mut self, direction: Reorder) -> bool {
        let Some(selected) = self.model.selected() else {
            return false;
        };
        self.model.reorder(selected, direction).unwrap_or(false)
    }

    pub fn clear_all(&mut self) -> bool {
        if self.mode != CreativeMode::Freehand {
            return false;
        }
        self.controller.reset();
        self.model.clear_all();
        true
    }

    fn pointer_event(&mut self, pointer: PointerId, device: Pos2, at: Duration) -> PointerEvent {
        self.last_pointer = Some(device);
        PointerEvent::new(pointer, map_pointer(self.surface.as_ref(), device), at)
    }

    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        device: Pos2,
        at: Duration,
    ) -> GestureOutcome {
        let event = self.pointer_event(pointer, device, at);
        self.controller
            .pointer_down(&mut self.model, self.mode, &self.tools, event)
    }

    pub fn pointer_move(
        &mut self,
        pointer: PointerId,
        device: Pos2,
        at: Duration,
    ) -> GestureOutcome {
        let event = self.pointer_event(pointer, device, at);
        self.controller.pointer_move(&mut self.model, event)
    }

    pub fn pointer_up(&mut self, pointer: PointerId, device: Pos2, at: Duration) -> GestureOutcome {
        let event = self.pointer_event(pointer, device, at);
        self.controller.pointer_up(&mut self.model, event)
    }

    pub fn pointer_leave(
        &mut self,
        pointer: PointerId,
        device: Pos2,
        at: Duration,
    ) -> GestureOutcome {
        let event = self.pointer_event(pointer, device, at);
        self.controller.pointer_leave(&mut self.model, event)
    }

    /// The pointer vanished without a position of its own: the gesture ends
    /// where the pointer was last seen.
    pub fn pointer_gone(&mut self, pointer: PointerId, at: Duration) -> GestureOutcome {
        let Some(device) = self.last_pointer else {
            self.controller.reset();
            return GestureOutcome::Ignored;
        };
        self.pointer_leave(pointer, device, at)
    }

    pub fn export_style(&self) -> ExportStyle {
        match self.mode {
            CreativeMode::Geometric => ExportStyle {
                background: Some(GLASS_BACKDROP.to_string()),
                fill_opacity: self.tools.light,
            },
            CreativeMode::Freehand => ExportStyle {
                background: Some(PAPER_BACKDROP.to_string()),
                fill_opacity: 1.0,
            },
        }
    }

    /// Ends any gesture, drops the selection so its highlight is not part of
    /// the artifact, and serializes the creation as an SVG data URI.
    pub fn finish(&mut self) -> Result<String, ExportError> {
        if self.surface.is_none() {
            return Err(ExportError::SurfaceUnavailable);
        }
        self.controller.reset();
        self.model.select(None);
        let svg = render_svg(self.model.elements(), &self.export_style());
        Ok(to_data_uri(&svg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atelier::export::SVG_DATA_URI_PREFIX;
    use crate::atelier::model::DrawingElement;
    use crate::catalog::catalogue;
    use eframe::egui::{vec2, Rect};

    fn mounted(mode: CreativeMode) -> AtelierSession {
        let mut session = AtelierSession::new(mode, None);
        session.set_surface(SurfaceTransform::slice(Rect::from_min_size(
            Pos2::ZERO,
            vec2(500.0, 500.0),
        )));
        session
    }

    #[test]
    fn mode_hint_defaults_to_stained_glass() {
        assert_eq!(CreativeMode::from_hint(Some("peinture")), CreativeMode::Freehand);
        assert_eq!(CreativeMode::from_hint(Some(" Peinture ")), CreativeMode::Freehand);
        assert_eq!(CreativeMode::from_hint(Some("vitrail")), CreativeMode::Geometric);
        assert_eq!(CreativeMode::from_hint(Some("parcours")), CreativeMode::Geometric);
        assert_eq!(CreativeMode::from_hint(None), CreativeMode::Geometric);
        assert_eq!(CreativeMode::explicit(Some("libre")), None);
        assert_eq!(CreativeMode::explicit(Some("parcours")), None);
        assert_eq!(CreativeMode::explicit(Some(" VITRAIL")), Some(CreativeMode::Geometric));
    }

    #[test]
    fn artwork_seeds_palette_and_challenge() {
        let artwork = catalogue()
            .find("FERRON_V02")
            .expect("catalogue should contain FERRON_V02");
        let session = AtelierSession::new(CreativeMode::Geometric, Some(artwork));

        assert_eq!(session.palette(), artwork.palette.as_slice());
        assert_eq!(session.challenge(), artwork.challenge.as_slice());
        assert_eq!(session.tools().color, artwork.palette[0]);
        assert_eq!(session.artwork_id(), Some("FERRON_V02"));
    }

    #[test]
    fn missing_artwork_falls_back_to_default_palette() {
        let session = AtelierSession::new(CreativeMode::Freehand, None);
        assert_eq!(session.palette().len(), 6);
        assert_eq!(session.palette()[0], DEFAULT_PALETTE[0]);
        assert_eq!(session.challenge(), ["Peins une toile expressive!".to_string()]);
    }

    #[test]
    fn finish_without_mounted_surface_is_an_explicit_error() {
        let mut session = AtelierSession::new(CreativeMode::Geometric, None);
        session.add_shape(ShapeKind::Rectangle);
        assert_eq!(session.finish(), Err(ExportError::SurfaceUnavailable));
    }

    #[test]
    fn finish_clears_selection_and_exports_data_uri() {
        let mut session = mounted(CreativeMode::Geometric);
        let id = session
            .add_shape(ShapeKind::Ellipse)
            .expect("geometric mode should add shapes");
        let center = session
            .model()
            .shape(id)
            .expect("shape should exist")
            .center();
        let device = session
            .surface()
            .expect("surface should be mounted")
            .to_device(center);
        session.pointer_down(0, device, Duration::ZERO);
        assert_eq!(session.model().selected(), Some(id));

        let uri = session.finish().expect("mounted surface should export");
        assert!(uri.starts_with(SVG_DATA_URI_PREFIX));
        assert_eq!(session.model().selected(), None);
        assert!(!session.is_gesture_active());
    }

    #[test]
    fn device_pointer_events_paint_in_logical_units() {
        let mut session = mounted(CreativeMode::Freehand);
        session.set_brush_size(2.0);
        session.pointer_down(0, Pos2::new(50.0, 50.0), Duration::ZERO);
        session.pointer_move(0, Pos2::new(250.0, 250.0), Duration::from_millis(16));
        session.pointer_up(0, Pos2::new(250.0, 250.0), Duration::from_millis(32));

        let Some(DrawingElement::Stroke(stroke)) = session.model().elements().first() else {
            panic!("a stroke should have been painted");
        };
        let points: Vec<_> = stroke.points().collect();
        assert_eq!(points.len(), 2);
        assert!((points[0].x - 10.0).abs() < 1e-3);
        assert!((points[1].y - 50.0).abs() < 1e-3);
        assert_eq!(stroke.width, 2.0);
    }

    #[test]
    fn vanished_pointer_releases_a_drag_where_it_was_last_seen() {
        let mut session = mounted(CreativeMode::Geometric);
        let id = session
            .add_shape(ShapeKind::Rectangle)
            .expect("geometric mode should add shapes");
        let before = session.model().shape(id).expect("shape should exist").origin;
        let device = session
            .surface()
            .expect("surface should be mounted")
            .to_device(session.model().shape(id).expect("shape should exist").center());

        session.pointer_down(0, device, Duration::ZERO);
        let outcome = session.pointer_gone(0, Duration::from_millis(500));

        assert!(matches!(outcome, GestureOutcome::Dragged { element, .. } if element == id));
        assert_eq!(session.model().shape(id).expect("shape should exist").origin, before);
        assert!(!session.is_gesture_active());
    }

    #[test]
    fn vanished_pointer_without_history_just_ends_the_gesture() {
        let mut session = mounted(CreativeMode::Freehand);
        assert_eq!(session.pointer_gone(0, Duration::ZERO), GestureOutcome::Ignored);
        assert!(!session.is_gesture_active());
    }

    #[test]
    fn mode_specific_tools_are_rejected_in_the_other_mode() {
        let mut freehand = mounted(CreativeMode::Freehand);
        assert!(freehand.add_shape(ShapeKind::Rectangle).is_none());

        let mut geometric = mounted(CreativeMode::Geometric);
        geometric.add_shape(ShapeKind::Rectangle);
        assert!(!geometric.clear_all());
        assert_eq!(geometric.model().len(), 1);
    }

    #[test]
    fn light_is_clamped_and_drives_fill_opacity() {
        let mut session = mounted(CreativeMode::Geometric);
        session.set_light(3.0);
        assert_eq!(session.tools().light, 1.0);
        session.set_light(0.0);
        assert_eq!(session.tools().light, 0.2);
        assert_eq!(session.export_style().fill_opacity, 0.2);
    }
}
