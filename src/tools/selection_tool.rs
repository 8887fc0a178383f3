use egui::CursorIcon;
use log::debug;

use super::{Tool, ToolKind};
use crate::element::{Element, ElementId};
use crate::geometry::{HandlePosition, Point};
use crate::input::PointerEvent;
use crate::state::EditorContext;

/// What the selection tool is doing with the pointer held down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    /// Moving the whole element by each pointer delta
    Dragging { element: ElementId, last: Point },
    /// A handle of the selected element was grabbed. Resizing does not change
    /// geometry yet; the grab only keeps the press from reselecting.
    Resizing {
        element: ElementId,
        handle: HandlePosition,
        start: Point,
    },
}

/// Click to select, drag to move
#[derive(Debug, Clone, Default)]
pub struct SelectionTool {
    state: SelectionState,
}

impl SelectionTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Handle captured by the current press, if any
    pub fn active_handle(&self) -> Option<HandlePosition> {
        match self.state {
            SelectionState::Resizing { handle, .. } => Some(handle),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging { .. })
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &'static str {
        "Select"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn cancel(&mut self, _ctx: &mut EditorContext) -> bool {
        let was_active = self.state != SelectionState::Idle;
        self.state = SelectionState::Idle;
        was_active
    }

    fn on_pointer_down(&mut self, event: PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() {
            return;
        }
        let point = event.position;

        // Handles of the current selection win over whatever lies beneath them
        if let Some(selected) = ctx.scene.selected() {
            if let Some(handle) = selected.handle_at(point) {
                debug!("Grabbed {} handle of {}", handle.as_str(), selected.id());
                self.state = SelectionState::Resizing {
                    element: selected.id(),
                    handle,
                    start: point,
                };
                return;
            }
        }

        let hit = ctx.scene.hit_test(point);
        if hit != ctx.scene.selected_id() {
            ctx.scene.select(hit);
            ctx.request_render();
        }

        self.state = match hit {
            Some(element) => {
                debug!("Selected {element}");
                SelectionState::Dragging {
                    element,
                    last: point,
                }
            }
            None => SelectionState::Idle,
        };
    }

    fn on_pointer_move(&mut self, event: PointerEvent, ctx: &mut EditorContext) {
        let SelectionState::Dragging { element, last } = self.state else {
            return;
        };

        let dx = event.position.x - last.x;
        let dy = event.position.y - last.y;
        if dx == 0 && dy == 0 {
            return;
        }

        let Some(target) = ctx.scene.get_mut(element) else {
            // Removed underneath us (undo, delete)
            self.state = SelectionState::Idle;
            return;
        };
        target.translate(dx, dy);
        self.state = SelectionState::Dragging {
            element,
            last: event.position,
        };
        ctx.request_render();
    }

    fn on_pointer_up(&mut self, _event: PointerEvent, _ctx: &mut EditorContext) {
        self.state = SelectionState::Idle;
    }

    fn cursor(&self, ctx: &EditorContext, pointer: Option<Point>) -> CursorIcon {
        match self.state {
            SelectionState::Resizing { handle, .. } => handle.cursor_icon(),
            SelectionState::Dragging { .. } => CursorIcon::Grabbing,
            SelectionState::Idle => pointer
                .and_then(|point| ctx.scene.selected()?.handle_at(point))
                .map_or(CursorIcon::Default, |handle| handle.cursor_icon()),
        }
    }

    fn current_state_name(&self) -> &'static str {
        match self.state {
            SelectionState::Idle => "idle",
            SelectionState::Dragging { .. } => "dragging",
            SelectionState::Resizing { .. } => "resizing",
        }
    }
}
