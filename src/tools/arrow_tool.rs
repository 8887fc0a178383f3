use log::debug;

use super::{ShapeDrag, Tool, ToolKind};
use crate::canvas::Canvas;
use crate::element::arrow::paint_arrow;
use crate::element::factory;
use crate::input::PointerEvent;
use crate::state::EditorContext;

/// Drag from tail to tip to draw an arrow
#[derive(Debug, Clone, Default)]
pub struct ArrowTool {
    drag: ShapeDrag,
}

impl ArrowTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for ArrowTool {
    fn name(&self) -> &'static str {
        "Arrow"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Arrow
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
        if start == end {
            debug!("Ignoring zero-length arrow at {start:?}");
            return;
        }
        let arrow = factory::create_arrow(start, end, ctx.color, ctx.stroke_width);
        ctx.commit_element(arrow);
    }

    fn on_paint(&self, ctx: &EditorContext, canvas: &mut Canvas) {
        let preview = ctx.preview;
        if self.drag.is_dragging() && preview.start != preview.end {
            paint_arrow(canvas, preview.start, preview.end, ctx.color, ctx.stroke_width);
        }
    }

    fn current_state_name(&self) -> &'static str {
        if self.drag.is_dragging() { "previewing" } else { "idle" }
    }
}
