use std::fmt;
use std::str::FromStr;

use egui::CursorIcon;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::error::{EditorError, EditorResult};
use crate::geometry::Point;
use crate::input::{KeyEvent, PointerEvent};
use crate::state::EditorContext;

/// Tool trait defines the interface every editing mode implements.
///
/// Tools keep only transient interaction state. Everything they create or
/// change goes through the [`EditorContext`].
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    fn kind(&self) -> ToolKind;

    /// Called when the tool becomes the active one
    fn activate(&mut self, _ctx: &mut EditorContext) {
        // default: do nothing
    }

    /// Called when another tool takes over. Must drop any uncommitted preview or edit.
    fn deactivate(&mut self, ctx: &mut EditorContext) {
        self.cancel(ctx);
    }

    /// Discards the in-progress interaction. Returns false when there was none.
    fn cancel(&mut self, ctx: &mut EditorContext) -> bool;

    fn on_pointer_down(&mut self, event: PointerEvent, ctx: &mut EditorContext);

    fn on_pointer_move(&mut self, event: PointerEvent, ctx: &mut EditorContext);

    fn on_pointer_up(&mut self, event: PointerEvent, ctx: &mut EditorContext);

    /// Key input. Returns true when the tool consumed the key.
    fn on_key(&mut self, _key: KeyEvent, _ctx: &mut EditorContext) -> bool {
        false
    }

    /// Typed text. Returns true when the tool consumed it.
    fn on_text(&mut self, _text: &str, _ctx: &mut EditorContext) -> bool {
        false
    }

    /// Paints live preview overlays on top of the rendered scene
    fn on_paint(&self, _ctx: &EditorContext, _canvas: &mut Canvas) {}

    /// Cursor to show with the pointer at `pointer`
    fn cursor(&self, _ctx: &EditorContext, _pointer: Option<Point>) -> CursorIcon {
        CursorIcon::Crosshair
    }

    fn current_state_name(&self) -> &'static str;
}

mod arrow_tool;
mod rectangle_tool;
mod selection_tool;
mod shape_drag;
mod stamp_tool;
mod text_tool;

pub use arrow_tool::ArrowTool;
pub use rectangle_tool::RectangleTool;
pub use selection_tool::{SelectionState, SelectionTool};
pub use shape_drag::ShapeDrag;
pub use stamp_tool::StampTool;
pub use text_tool::{TextState, TextTool};

/// Names of the available tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Arrow,
    Rectangle,
    Text,
    Stamp,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Select,
        ToolKind::Arrow,
        ToolKind::Rectangle,
        ToolKind::Text,
        ToolKind::Stamp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Arrow => "arrow",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Text => "text",
            ToolKind::Stamp => "stamp",
        }
    }

    /// Label shown on the tools panel
    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Select => "⬚ Select",
            ToolKind::Arrow => "➡ Arrow",
            ToolKind::Rectangle => "▭ Rectangle",
            ToolKind::Text => "T Text",
            ToolKind::Stamp => "① Stamp",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = EditorError;

    /// Case-insensitive lookup by tool name
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| EditorError::UnknownTool(name.to_owned()))
    }
}

/// Enum representing all available tools.
/// Avoids `Box<dyn Tool>` and keeps tools cheap to clone.
#[derive(Debug, Clone)]
pub enum ToolType {
    Select(SelectionTool),
    Arrow(ArrowTool),
    Rectangle(RectangleTool),
    Text(TextTool),
    Stamp(StampTool),
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Select(tool) => tool.name(),
            Self::Arrow(tool) => tool.name(),
            Self::Rectangle(tool) => tool.name(),
            Self::Text(tool) => tool.name(),
            Self::Stamp(tool) => tool.name(),
        }
    }

    fn kind(&self) -> ToolKind {
        match self {
            Self::Select(tool) => tool.kind(),
            Self::Arrow(tool) => tool.kind(),
            Self::Rectangle(tool) => tool.kind(),
            Self::Text(tool) => tool.kind(),
            Self::Stamp(tool) => tool.kind(),
        }
    }

    fn activate(&mut self, ctx: &mut EditorContext) {
        match self {
            Self::Select(tool) => tool.activate(ctx),
            Self::Arrow(tool) => tool.activate(ctx),
            Self::Rectangle(tool) => tool.activate(ctx),
            Self::Text(tool) => tool.activate(ctx),
            Self::Stamp(tool) => tool.activate(ctx),
        }
    }

    fn deactivate(&mut self, ctx: &mut EditorContext) {
        match self {
            Self::Select(tool) => tool.deactivate(ctx),
            Self::Arrow(tool) => tool.deactivate(ctx),
            Self::Rectangle(tool) => tool.deactivate(ctx),
            Self::Text(tool) => tool.deactivate(ctx),
            Self::Stamp(tool) => tool.deactivate(ctx),
        }
    }

    fn cancel(&mut self, ctx: &mut EditorContext) -> bool {
        match self {
            Self::Select(tool) => tool.cancel(ctx),
            Self::Arrow(tool) => tool.cancel(ctx),
            Self::Rectangle(tool) => tool.cancel(ctx),
            Self::Text(tool) => tool.cancel(ctx),
            Self::Stamp(tool) => tool.cancel(ctx),
        }
    }

    fn on_pointer_down(&mut self, event: PointerEvent, ctx: &mut EditorContext) {
        match self {
            Self::Select(tool) => tool.on_pointer_down(event, ctx),
            Self::Arrow(tool) => tool.on_pointer_down(event, ctx),
            Self::Rectangle(tool) => tool.on_pointer_down(event, ctx),
            Self::Text(tool) => tool.on_pointer_down(event, ctx),
            Self::Stamp(tool) => tool.on_pointer_down(event, ctx),
        }
    }

    fn on_pointer_move(&mut self, event: PointerEvent, ctx: &mut EditorContext) {
        match self {
            Self::Select(tool) => tool.on_pointer_move(event, ctx),
            Self::Arrow(tool) => tool.on_pointer_move(event, ctx),
            Self::Rectangle(tool) => tool.on_pointer_move(event, ctx),
            Self::Text(tool) => tool.on_pointer_move(event, ctx),
            Self::Stamp(tool) => tool.on_pointer_move(event, ctx),
        }
    }

    fn on_pointer_up(&mut self, event: PointerEvent, ctx: &mut EditorContext) {
        match self {
            Self::Select(tool) => tool.on_pointer_up(event, ctx),
            Self::Arrow(tool) => tool.on_pointer_up(event, ctx),
            Self::Rectangle(tool) => tool.on_pointer_up(event, ctx),
            Self::Text(tool) => tool.on_pointer_up(event, ctx),
            Self::Stamp(tool) => tool.on_pointer_up(event, ctx),
        }
    }

    fn on_key(&mut self, key: KeyEvent, ctx: &mut EditorContext) -> bool {
        match self {
            Self::Select(tool) => tool.on_key(key, ctx),
            Self::Arrow(tool) => tool.on_key(key, ctx),
            Self::Rectangle(tool) => tool.on_key(key, ctx),
            Self::Text(tool) => tool.on_key(key, ctx),
            Self::Stamp(tool) => tool.on_key(key, ctx),
        }
    }

    fn on_text(&mut self, text: &str, ctx: &mut EditorContext) -> bool {
        match self {
            Self::Select(tool) => tool.on_text(text, ctx),
            Self::Arrow(tool) => tool.on_text(text, ctx),
            Self::Rectangle(tool) => tool.on_text(text, ctx),
            Self::Text(tool) => tool.on_text(text, ctx),
            Self::Stamp(tool) => tool.on_text(text, ctx),
        }
    }

    fn on_paint(&self, ctx: &EditorContext, canvas: &mut Canvas) {
        match self {
            Self::Select(tool) => tool.on_paint(ctx, canvas),
            Self::Arrow(tool) => tool.on_paint(ctx, canvas),
            Self::Rectangle(tool) => tool.on_paint(ctx, canvas),
            Self::Text(tool) => tool.on_paint(ctx, canvas),
            Self::Stamp(tool) => tool.on_paint(ctx, canvas),
        }
    }

    fn cursor(&self, ctx: &EditorContext, pointer: Option<Point>) -> CursorIcon {
        match self {
            Self::Select(tool) => tool.cursor(ctx, pointer),
            Self::Arrow(tool) => tool.cursor(ctx, pointer),
            Self::Rectangle(tool) => tool.cursor(ctx, pointer),
            Self::Text(tool) => tool.cursor(ctx, pointer),
            Self::Stamp(tool) => tool.cursor(ctx, pointer),
        }
    }

    fn current_state_name(&self) -> &'static str {
        match self {
            Self::Select(tool) => tool.current_state_name(),
            Self::Arrow(tool) => tool.current_state_name(),
            Self::Rectangle(tool) => tool.current_state_name(),
            Self::Text(tool) => tool.current_state_name(),
            Self::Stamp(tool) => tool.current_state_name(),
        }
    }
}

// Helper methods for ToolType
impl ToolType {
    pub fn as_selection_tool(&self) -> Option<&SelectionTool> {
        match self {
            Self::Select(tool) => Some(tool),
            _ => None,
        }
    }

    pub fn as_text_tool_mut(&mut self) -> Option<&mut TextTool> {
        match self {
            Self::Text(tool) => Some(tool),
            _ => None,
        }
    }
}

/// Factory function to create a new tool of the given kind
pub fn new_tool(kind: ToolKind) -> ToolType {
    match kind {
        ToolKind::Select => ToolType::Select(SelectionTool::new()),
        ToolKind::Arrow => ToolType::Arrow(ArrowTool::new()),
        ToolKind::Rectangle => ToolType::Rectangle(RectangleTool::new()),
        ToolKind::Text => ToolType::Text(TextTool::new()),
        ToolKind::Stamp => ToolType::Stamp(StampTool::new()),
    }
}

/// Holds the active tool and performs switches
#[derive(Debug, Clone)]
pub struct ToolManager {
    active: ToolType,
}

impl ToolManager {
    pub fn new(initial: ToolKind) -> Self {
        Self {
            active: new_tool(initial),
        }
    }

    pub fn active(&self) -> &ToolType {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut ToolType {
        &mut self.active
    }

    pub fn active_kind(&self) -> ToolKind {
        self.active.kind()
    }

    /// Switches to the tool called `name`. Unknown names leave the active tool untouched.
    pub fn set_active_tool(&mut self, name: &str, ctx: &mut EditorContext) -> EditorResult<()> {
        let kind = name.parse::<ToolKind>().inspect_err(|err| warn!("{err}"))?;
        self.switch_to(kind, ctx);
        Ok(())
    }

    pub fn switch_to(&mut self, kind: ToolKind, ctx: &mut EditorContext) {
        if self.active.kind() == kind {
            return;
        }

        self.active.deactivate(ctx);
        let mut next = new_tool(kind);
        next.activate(ctx);
        info!("Switched tool: {} -> {}", self.active.name(), next.name());
        self.active = next;
    }
}
