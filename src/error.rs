use thiserror::Error;

/// Errors surfaced by the editor and its host shell.
///
/// Rejected input (empty text, zero-area shapes) and undo on an empty
/// history are not errors: those operations quietly do nothing.
#[derive(Debug, Error)]
pub enum EditorError {
    /// No tool is registered under this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Failed to load font {name}: {reason}")]
    Font { name: String, reason: String },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
