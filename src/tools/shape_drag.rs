use log::debug;

use crate::geometry::Point;
use crate::input::PointerEvent;
use crate::state::EditorContext;

/// Press-drag-release bookkeeping shared by the shape tools.
///
/// The drag endpoints live in the context's preview so the editor can see
/// them; this only tracks whether a drag started with the primary button.
#[derive(Debug, Clone, Default)]
pub struct ShapeDrag {
    dragging: bool,
}

impl ShapeDrag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn begin(&mut self, event: PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() {
            return;
        }
        self.dragging = true;
        ctx.preview.begin(event.position);
        ctx.invalidate_view();
    }

    pub fn update(&mut self, event: PointerEvent, ctx: &mut EditorContext) {
        if !self.dragging || ctx.preview.end == event.position {
            return;
        }
        ctx.preview.end = event.position;
        ctx.invalidate_view();
    }

    /// Ends the drag at the release point and returns its endpoints.
    /// The preview is cleared either way.
    pub fn finish(&mut self, event: PointerEvent, ctx: &mut EditorContext) -> Option<(Point, Point)> {
        if !self.dragging || !event.is_primary() {
            return None;
        }
        self.dragging = false;
        let start = ctx.preview.start;
        let end = event.position;
        ctx.preview.clear();
        ctx.invalidate_view();
        Some((start, end))
    }

    pub fn cancel(&mut self, ctx: &mut EditorContext) -> bool {
        if !self.dragging {
            return false;
        }
        debug!("Shape preview cancelled");
        self.dragging = false;
        ctx.preview.clear();
        ctx.invalidate_view();
        true
    }
}
