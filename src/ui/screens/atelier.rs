use crate::atelier::geometry::SurfaceTransform;
use crate::atelier::model::{DrawingElement, GeometricShape, Reorder, ShapeKind, Stroke};
use crate::atelier::{
    AtelierSession, CreativeMode, BRUSH_SHAPES, BRUSH_SIZES, GLASS_BACKDROP, LIGHT_RANGE,
    PAPER_BACKDROP,
};
use crate::theme::{parse_hex_color, Theme};
use crate::ui::event::UiAction;
use crate::ui::screens::{layout, ScreenView};
use eframe::egui::{self, Color32, Pos2, Rect, RichText, Sense, Shape, StrokeKind};
use std::time::Duration;

const TOOLS_WIDTH: f32 = 280.0;
const SWATCH: f32 = 36.0;
const OUTLINE: Color32 = Color32::from_rgb(31, 41, 55);

/// Single-pointer input: the kiosk screen reports one touch as the mouse.
const POINTER: u64 = 0;

/// Canvas-relevant pointer input, already filtered against the canvas rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasInput {
    Down(Pos2),
    Move(Pos2),
    Up(Pos2),
    Leave(Pos2),
    /// The pointer vanished; it carries no position of its own.
    Gone,
}

/// Filters raw frame events down to what the canvas reacts to. Presses only
/// count inside `rect`; once a gesture is running, moves outside `rect` and a
/// vanished pointer end it.
pub fn canvas_inputs(
    events: &[egui::Event],
    rect: Rect,
    mut gesture_active: bool,
) -> Vec<CanvasInput> {
    let mut inputs = Vec::new();
    for event in events {
        match event {
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                ..
            } => {
                if *pressed && rect.contains(*pos) {
                    inputs.push(CanvasInput::Down(*pos));
                    gesture_active = true;
                } else if !*pressed && gesture_active {
                    inputs.push(CanvasInput::Up(*pos));
                    gesture_active = false;
                }
            }
            egui::Event::PointerMoved(pos) => {
                if !gesture_active {
                    continue;
                }
                if rect.contains(*pos) {
                    inputs.push(CanvasInput::Move(*pos));
                } else {
                    inputs.push(CanvasInput::Leave(*pos));
                    gesture_active = false;
                }
            }
            egui::Event::PointerGone if gesture_active => {
                inputs.push(CanvasInput::Gone);
                gesture_active = false;
            }
            _ => {}
        }
    }
    inputs
}

pub fn show(ui: &mut egui::Ui, view: &mut ScreenView<'_>, emit: &mut dyn FnMut(UiAction)) {
    layout(ui, view, emit, |ui, view, emit| {
        let theme = view.theme;
        let loading = view.loading;
        let export_error = view.export_error;
        let Some(session) = view.atelier.as_deref_mut() else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Préparation de l'atelier…").color(theme.text_muted));
            });
            return;
        };

        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_width(TOOLS_WIDTH);
                tools(ui, theme, session, loading, export_error, emit);
            });
            ui.add_space(theme.spacing_16);
            canvas(ui, theme, session);
        });
    });
}

fn tools(
    ui: &mut egui::Ui,
    theme: &Theme,
    session: &mut AtelierSession,
    loading: bool,
    export_error: Option<&str>,
    emit: &mut dyn FnMut(UiAction),
) {
    theme.card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new("Défi").strong().color(theme.highlight));
        for line in session.challenge() {
            ui.label(format!("• {line}"));
        }
    });
    ui.add_space(theme.spacing_12);

    ui.label(RichText::new("Couleurs").strong());
    let palette = session.palette().to_vec();
    ui.horizontal_wrapped(|ui| {
        for color in &palette {
            let fill = parse_hex_color(color).unwrap_or(Color32::GRAY);
            let selected = session.tools().color == *color;
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(SWATCH, SWATCH), Sense::click());
            ui.painter().circle_filled(rect.center(), SWATCH / 2.0 - 2.0, fill);
            let ring = if selected {
                egui::Stroke::new(3.0, theme.selection_outline)
            } else {
                egui::Stroke::new(1.0, theme.border_subtle)
            };
            ui.painter().circle_stroke(rect.center(), SWATCH / 2.0 - 2.0, ring);
            if response.clicked() {
                session.select_color(color);
            }
        }
    });
    ui.add_space(theme.spacing_12);

    match session.mode() {
        CreativeMode::Geometric => geometric_tools(ui, theme, session),
        CreativeMode::Freehand => freehand_tools(ui, theme, session),
    }

    ui.add_space(theme.spacing_16);
    if ui
        .add_enabled(!loading, theme.primary_button("Terminer et Enregistrer"))
        .clicked()
    {
        emit(UiAction::FinishCreation);
    }
    if let Some(error) = export_error {
        ui.label(RichText::new(error).color(theme.danger));
    }
}

fn geometric_tools(ui: &mut egui::Ui, theme: &Theme, session: &mut AtelierSession) {
    ui.label(RichText::new("Formes").strong());
    ui.horizontal_wrapped(|ui| {
        if ui.add(theme.chip_button("▭ Rectangle")).clicked() {
            session.add_shape(ShapeKind::Rectangle);
        }
        if ui.add(theme.chip_button("◯ Ellipse")).clicked() {
            session.add_shape(ShapeKind::Ellipse);
        }
    });

    let has_selection = session.model().selected().is_some();
    ui.horizontal_wrapped(|ui| {
        if ui
            .add_enabled(has_selection, theme.chip_button("Devant"))
            .clicked()
        {
            session.reorder_selected(Reorder::ToFront);
        }
        if ui
            .add_enabled(has_selection, theme.chip_button("Derrière"))
            .clicked()
        {
            session.reorder_selected(Reorder::ToBack);
        }
        if ui
            .add_enabled(has_selection, theme.chip_button("Supprimer"))
            .clicked()
        {
            session.delete_selected();
        }
    });
    ui.label(
        RichText::new(
            "Double-tape une forme pour la mettre devant, glisse vite pour la déplacer d'un plan.",
        )
        .small()
        .color(theme.text_muted),
    );

    ui.add_space(theme.spacing_8);
    ui.label(RichText::new("Lumière").strong());
    let mut light = session.tools().light;
    if ui.add(egui::Slider::new(&mut light, LIGHT_RANGE)).changed() {
        session.set_light(light);
    }
}

fn freehand_tools(ui: &mut egui::Ui, theme: &Theme, session: &mut AtelierSession) {
    ui.label(RichText::new("Pinceau").strong());
    ui.horizontal_wrapped(|ui| {
        for (label, size) in BRUSH_SIZES {
            let active = session.tools().brush_size == size;
            if ui.add(theme.chip_button(label).selected(active)).clicked() {
                session.set_brush_size(size);
            }
        }
    });
    ui.horizontal_wrapped(|ui| {
        for (label, shape) in BRUSH_SHAPES {
            let active = session.tools().brush_shape == shape;
            if ui.add(theme.chip_button(label).selected(active)).clicked() {
                session.set_brush_shape(shape);
            }
        }
    });
    ui.add_space(theme.spacing_8);
    if ui.add(theme.chip_button("Tout effacer")).clicked() {
        session.clear_all();
    }
}

fn canvas(ui: &mut egui::Ui, theme: &Theme, session: &mut AtelierSession) {
    let available = ui.available_size();
    let side = available.x.min(available.y).max(0.0);
    let (rect, _response) = ui.allocate_exact_size(egui::vec2(side, side), Sense::click_and_drag());
    session.set_surface(SurfaceTransform::slice(rect));

    let (events, time) = ui.input(|i| (i.events.clone(), i.time));
    let at = Duration::from_secs_f64(time.max(0.0));
    for input in canvas_inputs(&events, rect, session.is_gesture_active()) {
        let outcome = match input {
            CanvasInput::Down(pos) => session.pointer_down(POINTER, pos, at),
            CanvasInput::Move(pos) => session.pointer_move(POINTER, pos, at),
            CanvasInput::Up(pos) => session.pointer_up(POINTER, pos, at),
            CanvasInput::Leave(pos) => session.pointer_leave(POINTER, pos, at),
            CanvasInput::Gone => session.pointer_gone(POINTER, at),
        };
        tracing::trace!(?input, ?outcome, "canvas input");
    }

    let Some(surface) = session.surface().copied() else {
        return;
    };
    let painter = ui.painter_at(rect);
    let (backdrop, light) = match session.mode() {
        CreativeMode::Geometric => (GLASS_BACKDROP, session.tools().light),
        CreativeMode::Freehand => (PAPER_BACKDROP, 1.0),
    };
    painter.rect_filled(
        rect,
        egui::CornerRadius::same(theme.radius_12),
        parse_hex_color(backdrop).unwrap_or(Color32::WHITE),
    );

    let selected = session.model().selected();
    for element in session.model().elements() {
        match element {
            DrawingElement::Shape(shape) => {
                paint_shape(&painter, &surface, shape, light);
                if selected == Some(shape.id) {
                    let bounds = shape_rect(&surface, shape).expand(4.0);
                    painter.rect_stroke(
                        bounds,
                        4.0,
                        egui::Stroke::new(3.0, theme.selection_outline),
                        StrokeKind::Outside,
                    );
                }
            }
            DrawingElement::Stroke(stroke) => paint_stroke(&painter, &surface, stroke),
        }
    }
    painter.rect_stroke(
        rect,
        egui::CornerRadius::same(theme.radius_12),
        egui::Stroke::new(1.0, theme.border_subtle),
        StrokeKind::Inside,
    );
}

fn shape_rect(surface: &SurfaceTransform, shape: &GeometricShape) -> Rect {
    let min = surface.to_device(shape.origin);
    Rect::from_min_size(
        min,
        egui::vec2(
            surface.to_device_length(shape.width),
            surface.to_device_length(shape.height),
        ),
    )
}

fn paint_shape(
    painter: &egui::Painter,
    surface: &SurfaceTransform,
    shape: &GeometricShape,
    light: f32,
) {
    let rect = shape_rect(surface, shape);
    let fill = parse_hex_color(&shape.fill)
        .unwrap_or(Color32::GRAY)
        .gamma_multiply(light);
    let outline = egui::Stroke::new(surface.to_device_length(0.5).max(1.0), OUTLINE);
    match shape.kind {
        ShapeKind::Rectangle => {
            painter.rect_filled(rect, 0.0, fill);
            painter.rect_stroke(rect, 0.0, outline, StrokeKind::Middle);
        }
        ShapeKind::Ellipse => {
            let radius = rect.size() / 2.0;
            painter.add(Shape::ellipse_filled(rect.center(), radius, fill));
            painter.add(Shape::ellipse_stroke(rect.center(), radius, outline));
        }
    }
}

fn paint_stroke(painter: &egui::Painter, surface: &SurfaceTransform, stroke: &Stroke) {
    let color = parse_hex_color(&stroke.color).unwrap_or(Color32::BLACK);
    let width = surface.to_device_length(stroke.width);
    let points: Vec<Pos2> = stroke.points().map(|point| surface.to_device(point)).collect();
    match points.as_slice() {
        [] => {}
        [dot] => {
            painter.circle_filled(*dot, width / 2.0, color);
        }
        _ => {
            painter.add(Shape::line(points, egui::Stroke::new(width, color)));
        }
    }
}
