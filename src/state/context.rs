//! Shared state handed to every tool.
//!
//! Tools never own scene data. They read the current drawing settings from
//! the context and change the scene through its methods, which keep the
//! snapshot-before-mutation rule in one place.

use egui::Color32;
use log::debug;

use crate::command::SnapshotHistory;
use crate::element::{Element, ElementType};
use crate::font::{FontBook, FontSpec};
use crate::geometry::Point;
use crate::scene::Scene;

/// Pink used when nothing else is configured
pub const DEFAULT_COLOR: Color32 = Color32::from_rgba_premultiplied(230, 100, 180, 255);
pub const DEFAULT_STROKE_WIDTH: i32 = 5;
pub const MIN_STROKE_WIDTH: i32 = 1;
pub const MAX_STROKE_WIDTH: i32 = 50;

/// Transient drag coordinates of a shape being drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preview {
    pub start: Point,
    pub end: Point,
    pub active: bool,
}

impl Preview {
    pub fn begin(&mut self, at: Point) {
        self.start = at;
        self.end = at;
        self.active = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug)]
pub struct EditorContext {
    pub color: Color32,
    pub stroke_width: i32,
    pub font: FontSpec,
    /// Whether the text tool produces shadowed text
    pub text_shadow: bool,
    pub fonts: FontBook,
    pub scene: Scene,
    pub history: SnapshotHistory,
    pub preview: Preview,
    /// Label of the next number stamp; only `reset` rewinds it
    pub stamp_counter: u32,
    render_requested: bool,
    view_invalidated: bool,
}

impl EditorContext {
    pub fn new(fonts: FontBook, history_depth: usize) -> Self {
        Self {
            color: DEFAULT_COLOR,
            stroke_width: DEFAULT_STROKE_WIDTH,
            font: FontSpec::default(),
            text_shadow: true,
            fonts,
            scene: Scene::new(),
            history: SnapshotHistory::new(history_depth),
            preview: Preview::default(),
            stamp_counter: 1,
            render_requested: false,
            view_invalidated: false,
        }
    }

    pub fn set_stroke_width(&mut self, width: i32) {
        self.stroke_width = width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
    }

    /// Loads the font file if needed; falls back to the built-in face on failure.
    /// The size is clamped to the supported range.
    pub fn set_font(&mut self, font: FontSpec) {
        let font = font.clamped();
        self.fonts.load_or_fallback(&font);
        self.font = font;
    }

    /// Pushes a copy of the current scene onto the undo history
    pub fn save_snapshot(&mut self) {
        self.history.save(&self.scene);
        debug!("Saved snapshot ({} in history)", self.history.len());
    }

    /// Appends a committed element and schedules a repaint.
    /// Callers take the snapshot first.
    pub fn add_element(&mut self, element: ElementType) {
        debug!("Adding {} {}", element.element_type(), element.id());
        self.scene.push(element);
        self.request_render();
    }

    /// Snapshot, append, repaint: the sequence every tool commit goes through
    pub fn commit_element(&mut self, element: ElementType) {
        self.save_snapshot();
        self.add_element(element);
    }

    /// Asks for a full re-render of the working buffer
    pub fn request_render(&mut self) {
        self.render_requested = true;
        self.view_invalidated = true;
    }

    /// Asks the view to repaint without re-rendering the scene (preview changes)
    pub fn invalidate_view(&mut self) {
        self.view_invalidated = true;
    }

    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    pub fn take_view_invalidation(&mut self) -> bool {
        std::mem::take(&mut self.view_invalidated)
    }

    /// Hands out the next stamp label
    pub fn next_stamp_number(&mut self) -> u32 {
        let number = self.stamp_counter;
        self.stamp_counter += 1;
        number
    }
}
