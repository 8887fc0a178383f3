//! The annotation editor: scene, tools, history and rendering behind one facade.
//!
//! The host shell feeds pointer, key and text events in and pulls rendered
//! images out. Everything happens synchronously on the caller's thread.

use egui::{Color32, CursorIcon, Key};
use image::RgbaImage;
use log::{debug, info};

use crate::canvas::Canvas;
use crate::command::{Command, CommandResult, SnapshotHistory};
use crate::config::EditorConfig;
use crate::element::{Element, ElementId, ElementType};
use crate::error::EditorResult;
use crate::font::{FontBook, FontSpec};
use crate::geometry::Point;
use crate::input::{KeyEvent, PointerEvent};
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::state::EditorContext;
use crate::tools::{Tool, ToolKind, ToolManager, ToolType};

pub struct Editor {
    context: EditorContext,
    tools: ToolManager,
    renderer: Renderer,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("tool", &self.tools.active_kind())
            .field("elements", &self.context.scene.len())
            .field("history", &self.context.history.len())
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Opens an editor over `image` with default settings
    pub fn new(image: RgbaImage) -> EditorResult<Self> {
        Self::with_config(image, &EditorConfig::default())
    }

    pub fn with_config(image: RgbaImage, config: &EditorConfig) -> EditorResult<Self> {
        let fonts = FontBook::with_default_fonts()?;
        let mut context = EditorContext::new(fonts, config.history_depth);
        context.color = config.color32();
        context.set_stroke_width(config.stroke_width);
        context.set_font(config.font.clone());
        context.text_shadow = config.text_shadow;

        let mut editor = Self {
            context,
            tools: ToolManager::new(config.default_tool),
            renderer: Renderer::new(image, config.background32()),
        };
        // Undo right after opening lands on the empty scene
        editor.context.save_snapshot();
        editor.render();

        info!(
            "Editor opened on {}x{} image",
            editor.renderer.width(),
            editor.renderer.height()
        );
        Ok(editor)
    }

    // Input

    pub fn handle_pointer_down(&mut self, event: PointerEvent) {
        self.tools.active_mut().on_pointer_down(event, &mut self.context);
        self.sync();
    }

    pub fn handle_pointer_move(&mut self, event: PointerEvent) {
        self.tools.active_mut().on_pointer_move(event, &mut self.context);
        self.sync();
    }

    pub fn handle_pointer_up(&mut self, event: PointerEvent) {
        self.tools.active_mut().on_pointer_up(event, &mut self.context);
        self.sync();
    }

    /// Returns true when the key did something
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.tools.active_mut().on_key(key, &mut self.context) {
            self.sync();
            return true;
        }

        if key.is_command(Key::Z) {
            self.undo();
            true
        } else if key.key == Key::Delete {
            self.delete_selected()
        } else if key.key == Key::Escape {
            self.cancel_interaction()
        } else {
            false
        }
    }

    pub fn handle_text(&mut self, text: &str) -> bool {
        let consumed = self.tools.active_mut().on_text(text, &mut self.context);
        self.sync();
        consumed
    }

    /// The canvas lost keyboard focus; pending text is kept
    pub fn focus_lost(&mut self) {
        if let Some(tool) = self.tools.active_mut().as_text_tool_mut() {
            tool.focus_lost(&mut self.context);
            self.sync();
        }
    }

    /// Drops the active tool's uncommitted preview or edit
    pub fn cancel_interaction(&mut self) -> bool {
        let cancelled = self.tools.active_mut().cancel(&mut self.context);
        self.sync();
        cancelled
    }

    // Commands

    pub fn execute(&mut self, command: Command) -> CommandResult {
        match command {
            Command::Undo => self.undo(),
            Command::Reset => self.reset(),
            Command::DeleteSelected => {
                self.delete_selected();
            }
            Command::SetTool(name) => self.set_active_tool(&name)?,
            Command::SetColor(color) => self.set_color(color),
            Command::SetStrokeWidth(width) => self.set_stroke_width(width),
            Command::SetFont(font) => self.set_font(font),
        }
        Ok(())
    }

    /// Restores the scene to the last snapshot. No-op when history is empty.
    pub fn undo(&mut self) {
        self.tools.active_mut().cancel(&mut self.context);
        let Some(snapshot) = self.context.history.pop() else {
            debug!("Nothing to undo");
            return;
        };

        let mut scene = snapshot.into_scene();
        scene.clear_selection();
        self.context.scene = scene;
        self.context.request_render();
        info!("Undo: {} elements", self.context.scene.len());
        self.sync();
    }

    /// Clears elements and history and rewinds stamp numbering.
    /// Leaves a single empty snapshot behind.
    pub fn reset(&mut self) {
        self.tools.active_mut().cancel(&mut self.context);
        self.context.history.clear();
        self.context.scene.clear();
        self.context.stamp_counter = 1;
        self.context.save_snapshot();
        self.context.request_render();
        info!("Reset editor");
        self.sync();
    }

    /// Removes the selected element. Returns false when nothing was selected.
    pub fn delete_selected(&mut self) -> bool {
        match self.context.scene.selected_id() {
            Some(id) => self.delete_element(id),
            None => false,
        }
    }

    /// Removes an element by id, snapshotting first. Clears the selection.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        if self.context.scene.get(id).is_none() {
            return false;
        }
        self.tools.active_mut().cancel(&mut self.context);
        self.context.save_snapshot();
        self.context.scene.remove(id);
        self.context.scene.clear_selection();
        self.context.request_render();
        info!("Deleted element {id}");
        self.sync();
        true
    }

    /// Switches tools by name. Unknown names are an error and change nothing.
    pub fn set_active_tool(&mut self, name: &str) -> EditorResult<()> {
        self.tools.set_active_tool(name, &mut self.context)?;
        self.sync();
        Ok(())
    }

    pub fn set_tool(&mut self, kind: ToolKind) {
        self.tools.switch_to(kind, &mut self.context);
        self.sync();
    }

    pub fn set_color(&mut self, color: Color32) {
        self.context.color = color;
        self.context.invalidate_view();
    }

    pub fn set_stroke_width(&mut self, width: i32) {
        self.context.set_stroke_width(width);
        self.context.invalidate_view();
    }

    pub fn set_font(&mut self, font: FontSpec) {
        self.context.set_font(font);
        self.context.invalidate_view();
    }

    // Queries

    pub fn has_selection(&self) -> bool {
        self.context.scene.selected().is_some()
    }

    pub fn selected_element(&self) -> Option<&ElementType> {
        self.context.scene.selected()
    }

    /// Selects an element directly, as a click with the select tool would
    pub fn select(&mut self, id: Option<ElementId>) {
        self.context.scene.select(id);
        self.context.request_render();
        self.sync();
    }

    pub fn scene(&self) -> &Scene {
        &self.context.scene
    }

    pub fn elements(&self) -> &[ElementType] {
        self.context.scene.elements()
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.context.history
    }

    pub fn context(&self) -> &EditorContext {
        &self.context
    }

    pub fn active_tool(&self) -> &ToolType {
        self.tools.active()
    }

    pub fn active_tool_kind(&self) -> ToolKind {
        self.tools.active_kind()
    }

    pub fn color(&self) -> Color32 {
        self.context.color
    }

    pub fn stroke_width(&self) -> i32 {
        self.context.stroke_width
    }

    pub fn font(&self) -> &FontSpec {
        &self.context.font
    }

    pub fn stamp_counter(&self) -> u32 {
        self.context.stamp_counter
    }

    pub fn cursor(&self, pointer: Option<Point>) -> CursorIcon {
        self.tools.active().cursor(&self.context, pointer)
    }

    pub fn width(&self) -> u32 {
        self.renderer.width()
    }

    pub fn height(&self) -> u32 {
        self.renderer.height()
    }

    // Output

    /// Full repaint of the working buffer
    pub fn render(&mut self) -> &RgbaImage {
        self.renderer.render(&self.context.scene, &self.context.fonts);
        self.context.invalidate_view();
        self.renderer.working()
    }

    /// The annotated image without tool previews, for saving or copying
    pub fn flatten(&self) -> RgbaImage {
        self.renderer.working().clone()
    }

    /// The annotated image with the active tool's preview on top
    pub fn display_image(&self) -> RgbaImage {
        let mut image = self.renderer.working().clone();
        let mut canvas = Canvas::new(&mut image, &self.context.fonts);
        self.tools.active().on_paint(&self.context, &mut canvas);
        image
    }

    /// True once after anything visible changed; the view re-uploads then
    pub fn take_view_invalidation(&mut self) -> bool {
        let redraw = self.renderer.take_redraw_request();
        self.context.take_view_invalidation() || redraw
    }

    /// Re-renders if a tool or command asked for it
    fn sync(&mut self) {
        if self.context.take_render_request() {
            self.render();
        }
    }
}
