use log::debug;

use super::{ShapeDrag, Tool, ToolKind};
use crate::canvas::Canvas;
use crate::element::factory;
use crate::geometry::Rect;
use crate::input::PointerEvent;
use crate::state::EditorContext;

/// Drag between two opposite corners to draw a rectangle
#[derive(Debug, Clone, Default)]
pub struct RectangleTool {
    drag: ShapeDrag,
}

impl RectangleTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for RectangleTool {
    fn name(&self) -> &'static str {
        "Rectangle"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Rectangle
    }

    fn cancel(&mut self, ctx: &mut EditorContext) -> bool {
        self.drag.cancel(ctx)
    }

    fn on_pointer_down(&mut self, event: PointerEvent, ctx: &mut EditorContext) {
        self.drag.begin(event, ctx);
    }

    fn on_pointer_move(&mut self, event: PointerEvent, ctx: &mut EditorContext) {
        self.drag.update(event, ctx);
    }

    fn on_pointer_up(&mut self, event: PointerEvent, ctx: &mut EditorContext) {
        let Some((start, end)) = self.drag.finish(event, ctx) else {
            return;
        };
        let rect = Rect::from_corners(start, end);
        if rect.is_empty() {
            debug!("Ignoring zero-area rectangle {rect:?}");
            return;
        }
        let element = factory::create_rectangle(rect, ctx.color, ctx.stroke_width);
        ctx.commit_element(element);
    }

    /// Plain square-cornered outline while dragging
    fn on_paint(&self, ctx: &EditorContext, canvas: &mut Canvas) {
        if !self.drag.is_dragging() {
            return;
        }
        let rect = Rect::from_corners(ctx.preview.start, ctx.preview.end);
        if !rect.is_empty() {
            canvas.stroke_rounded_rect(rect, 0, ctx.stroke_width, ctx.color);
        }
    }

    fn current_state_name(&self) -> &'static str {
        if self.drag.is_dragging() { "previewing" } else { "idle" }
    }
}
