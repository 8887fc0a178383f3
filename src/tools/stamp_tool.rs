use log::debug;

use super::{Tool, ToolKind};
use crate::element::factory;
use crate::input::PointerEvent;
use crate::state::EditorContext;

/// Click to drop the next numbered stamp
#[derive(Debug, Clone, Default)]
pub struct StampTool;

impl StampTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for StampTool {
    fn name(&self) -> &'static str {
        "Stamp"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Stamp
    }

    fn cancel(&mut self, _ctx: &mut EditorContext) -> bool {
        false
    }

    fn on_pointer_down(&mut self, event: PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() {
            return;
        }
        let number = ctx.next_stamp_number();
        debug!("Stamp {number} at {:?}", event.position);
        let stamp = factory::create_stamp(number, event.position, ctx.color);
        ctx.commit_element(stamp);
    }

    fn on_pointer_move(&mut self, _event: PointerEvent, _ctx: &mut EditorContext) {}

    fn on_pointer_up(&mut self, _event: PointerEvent, _ctx: &mut EditorContext) {}

    fn current_state_name(&self) -> &'static str {
        "idle"
    }
}
