//! Converts raw egui pointer input into domain-level stroke events.
//!
//! Keeping the translation separate from the panel means the stroke logic in
//! [`SketchCanvas`] stays exercisable from tests without any UI.

use crate::canvas::SketchCanvas;
use crate::state::AppState;
use egui::{Context, PointerButton, Pos2, Rect};

/// A pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed inside the canvas.
    Pressed(Pos2),
    /// Pointer moved while inside the canvas.
    Moved(Pos2),
    /// Primary button released.
    Released,
    /// Pointer left the canvas area.
    Left,
}

/// Translates egui pointer state into [`PointerEvent`]s for one canvas rect.
pub struct PointerTranslator {
    canvas_rect: Rect,
    last_pos: Option<Pos2>,
    was_inside: bool,
}

impl PointerTranslator {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            last_pos: None,
            was_inside: false,
        }
    }

    /// Update the canvas rectangle (the panel lays it out every frame).
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        Pos2::new(pos.x - self.canvas_rect.min.x, pos.y - self.canvas_rect.min.y)
    }

    /// Read this frame's pointer state and produce ordered events.
    pub fn gather(&mut self, ctx: &Context) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();
            let inside = hover.is_some_and(|pos| self.canvas_rect.contains(pos));

            if self.was_inside && !inside {
                events.push(PointerEvent::Left);
            }

            if let Some(pos) = hover {
                if inside && input.pointer.button_pressed(PointerButton::Primary) {
                    events.push(PointerEvent::Pressed(self.to_local(pos)));
                } else if inside && Some(pos) != self.last_pos {
                    events.push(PointerEvent::Moved(self.to_local(pos)));
                }
                self.last_pos = Some(pos);
            } else {
                self.last_pos = None;
            }

            if input.pointer.button_released(PointerButton::Primary) {
                events.push(PointerEvent::Released);
            }

            self.was_inside = inside;
        });

        events
    }
}

/// Apply one pointer event to the canvas using the current tool and brush.
pub fn apply_pointer_event(event: PointerEvent, state: &AppState, canvas: &mut SketchCanvas) {
    match event {
        PointerEvent::Pressed(pos) => {
            canvas.begin_stroke(pos, state.tool().color(), state.brush_size());
        }
        PointerEvent::Moved(pos) => {
            canvas.extend_stroke(pos, state.tool().color(), state.brush_size());
        }
        PointerEvent::Released | PointerEvent::Left => canvas.end_stroke(),
    }
}
