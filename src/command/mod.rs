pub mod history;

use egui::Color32;

use crate::error::EditorResult;
use crate::font::FontSpec;

pub use history::{DEFAULT_HISTORY_DEPTH, Snapshot, SnapshotHistory};

/// Result type for command execution
pub type CommandResult = EditorResult<()>;

/// Named operations the host shell can invoke on the editor
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Restore the scene to the most recent snapshot
    Undo,
    /// Clear every element and the history. The caller confirms first.
    Reset,
    DeleteSelected,
    /// Switch tools by name (`select`, `arrow`, `rectangle`, `text`, `stamp`)
    SetTool(String),
    SetColor(Color32),
    SetStrokeWidth(i32),
    SetFont(FontSpec),
}
