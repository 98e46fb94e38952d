//! Pointer gesture state machine for the atelier canvas.
//!
//! One gesture is tracked at a time. While a drag or a stroke is in flight,
//! events from any other pointer are ignored so they cannot corrupt the
//! shared gesture record.
//!
//! Thresholds below were tuned by feel on the kiosk touch screen and are
//! product decisions rather than protocol constants.

use crate::atelier::geometry::Point;
use crate::atelier::model::{DrawingModel, ElementId, Reorder};
use crate::atelier::{CreativeMode, ToolSettings};
use std::time::Duration;

/// A release faster than this can be a swipe.
pub const SWIPE_MAX_DURATION: Duration = Duration::from_millis(220);
/// Horizontal travel (logical units) a swipe must exceed.
pub const SWIPE_MIN_HORIZONTAL: f32 = 30.0;
/// Vertical travel (logical units) a swipe must stay below.
pub const SWIPE_MAX_VERTICAL: f32 = 12.0;
/// Max gap between two presses on the same shape for a double-tap.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(320);
/// Max distance (logical units) between the two presses of a double-tap.
pub const DOUBLE_TAP_RADIUS: f32 = 6.0;

pub type PointerId = u64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: PointerId,
    pub position: Point,
    /// Monotonic time of the event, relative to any fixed epoch.
    pub at: Duration,
}

impl PointerEvent {
    pub fn new(pointer: PointerId, position: Point, at: Duration) -> Self {
        Self {
            pointer,
            position,
            at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// The event did not belong to the active gesture, or nothing was hit.
    Ignored,
    Deselected,
    DragStarted(ElementId),
    DoubleTapped(ElementId),
    ShapeMoved(ElementId),
    StrokeStarted(ElementId),
    StrokeExtended(ElementId),
    Dragged {
        element: ElementId,
        delta: Point,
    },
    Swiped {
        element: ElementId,
        direction: Reorder,
    },
    StrokeFinished(ElementId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragRecord {
    pointer: PointerId,
    element: ElementId,
    pointer_start: Point,
    element_start: Point,
    started_at: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TapRecord {
    element: ElementId,
    position: Point,
    at: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum GestureState {
    #[default]
    Idle,
    DraggingShape(DragRecord),
    Painting {
        pointer: PointerId,
        stroke: ElementId,
    },
}

#[derive(Debug, Default)]
pub struct InteractionController {
    state: GestureState,
    last_tap: Option<TapRecord>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    /// Drops any in-flight gesture without touching the model.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.last_tap = None;
    }

    pub fn pointer_down(
        &mut self,
        model: &mut DrawingModel,
        mode: CreativeMode,
        tools: &ToolSettings,
        event: PointerEvent,
    ) -> GestureOutcome {
        if !self.is_idle() {
            return GestureOutcome::Ignored;
        }

        match mode {
            CreativeMode::Geometric => self.press_geometric(model, event),
            CreativeMode::Freehand => {
                let stroke = model.begin_stroke(
                    event.position,
                    tools.color.clone(),
                    tools.brush_size,
                    tools.brush_shape,
                );
                self.state = GestureState::Painting {
                    pointer: event.pointer,
                    stroke,
                };
                GestureOutcome::StrokeStarted(stroke)
            }
        }
    }

    fn press_geometric(&mut self, model: &mut DrawingModel, event: PointerEvent) -> GestureOutcome {
        let Some(element) = model.hit_test_shape(event.position) else {
            model.select(None);
            self.last_tap = None;
            return GestureOutcome::Deselected;
        };
        model.select(Some(element));

        if let Some(tap) = self.last_tap.take() {
            let within_window = event.at.saturating_sub(tap.at) <= DOUBLE_TAP_WINDOW;
            let within_radius = tap.position.distance(event.position) <= DOUBLE_TAP_RADIUS;
            if tap.element == element && within_window && within_radius {
                if let Err(err) = model.reorder(element, Reorder::ToFront) {
                    tracing::warn!(%err, "double-tap reorder failed");
                }
                return GestureOutcome::DoubleTapped(element);
            }
        }

        let Some(shape) = model.shape(element) else {
            return GestureOutcome::Ignored;
        };
        self.last_tap = Some(TapRecord {
            element,
            position: event.position,
            at: event.at,
        });
        self.state = GestureState::DraggingShape(DragRecord {
            pointer: event.pointer,
            element,
            pointer_start: event.position,
            element_start: shape.origin,
            started_at: event.at,
        });
        GestureOutcome::DragStarted(element)
    }

    pub fn pointer_move(
        &mut self,
        model: &mut DrawingModel,
        event: PointerEvent,
    ) -> GestureOutcome {
        match self.state {
            GestureState::DraggingShape(drag) if drag.pointer == event.pointer => {
                let delta = event.position - drag.pointer_start;
                match model.set_shape_origin(drag.element, drag.element_start + delta) {
                    Ok(()) => GestureOutcome::ShapeMoved(drag.element),
                    Err(err) => {
                        tracing::debug!(%err, "drag target vanished");
                        self.state = GestureState::Idle;
                        GestureOutcome::Ignored
                    }
                }
            }
            GestureState::Painting { pointer, stroke } if pointer == event.pointer => {
                match model.extend_stroke(stroke, event.position) {
                    Ok(()) => GestureOutcome::StrokeExtended(stroke),
                    Err(err) => {
                        tracing::debug!(%err, "stroke vanished mid-gesture");
                        self.state = GestureState::Idle;
                        GestureOutcome::Ignored
                    }
                }
            }
            _ => GestureOutcome::Ignored,
        }
    }

    pub fn pointer_up(&mut self, model: &mut DrawingModel, event: PointerEvent) -> GestureOutcome {
        match self.state {
            GestureState::DraggingShape(drag) if drag.pointer == event.pointer => {
                self.state = GestureState::Idle;
                self.release_drag(model, drag, event)
            }
            GestureState::Painting { pointer, stroke } if pointer == event.pointer => {
                self.state = GestureState::Idle;
                GestureOutcome::StrokeFinished(stroke)
            }
            _ => GestureOutcome::Ignored,
        }
    }

    /// Leaving the surface ends the gesture exactly like a release.
    pub fn pointer_leave(
        &mut self,
        model: &mut DrawingModel,
        event: PointerEvent,
    ) -> GestureOutcome {
        self.pointer_up(model, event)
    }

    fn release_drag(
        &mut self,
        model: &mut DrawingModel,
        drag: DragRecord,
        event: PointerEvent,
    ) -> GestureOutcome {
        let delta = event.position - drag.pointer_start;
        let Some(direction) = classify_swipe(event.at.saturating_sub(drag.started_at), delta) else {
            return match model.set_shape_origin(drag.element, drag.element_start + delta) {
                Ok(()) => GestureOutcome::Dragged {
                    element: drag.element,
                    delta,
                },
                Err(_) => GestureOutcome::Ignored,
            };
        };

        self.last_tap = None;
        if let Err(err) = model.set_shape_origin(drag.element, drag.element_start) {
            tracing::debug!(%err, "swipe target vanished");
            return GestureOutcome::Ignored;
        }
        if let Err(err) = model.reorder(drag.element, direction) {
            tracing::warn!(%err, "swipe reorder failed");
        }
        GestureOutcome::Swiped {
            element: drag.element,
            direction,
        }
    }
}

/// Fast, mostly-horizontal releases reorder instead of moving.
pub fn classify_swipe(elapsed: Duration, delta: Point) -> Option<Reorder> {
    if elapsed >= SWIPE_MAX_DURATION
        || delta.x.abs() <= SWIPE_MIN_HORIZONTAL
        || delta.y.abs() >= SWIPE_MAX_VERTICAL
    {
        return None;
    }
    if delta.x > 0.0 {
        Some(Reorder::StepForward)
    } else {
        Some(Reorder::StepBackward)
    }
}
