#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod config;
pub mod editor;
pub mod element;
pub mod error;
pub mod font;
pub mod geometry;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod tools;

pub use app::AnnotateApp;
pub use command::{Command, SnapshotHistory};
pub use config::EditorConfig;
pub use editor::Editor;
pub use element::{Element, ElementId, ElementType};
pub use error::{EditorError, EditorResult};
pub use geometry::{HandlePosition, Point, Rect};
pub use input::{KeyEvent, PointerButtons, PointerEvent};
pub use scene::Scene;
pub use tools::{Tool, ToolKind};
