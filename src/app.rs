use std::borrow::Cow;
use std::path::{Path, PathBuf};

use egui::{Event, TextureHandle, TextureOptions};
use log::{info, warn};

use crate::editor::Editor;
use crate::error::{EditorError, EditorResult};
use crate::geometry::Point;
use crate::input::{KeyEvent, PointerButtons, PointerEvent};
use crate::panels::{central_panel, tools_panel};

/// Desktop host around an [`Editor`]: shows the canvas, forwards input, saves and copies.
pub struct AnnotateApp {
    editor: Editor,
    output: PathBuf,
    texture: Option<TextureHandle>,
    /// Buttons currently held on the canvas
    buttons: PointerButtons,
    hover: Option<Point>,
    show_reset_confirmation: bool,
    status: Option<String>,
}

impl AnnotateApp {
    pub fn new(editor: Editor, output: PathBuf) -> Self {
        Self {
            editor,
            output,
            texture: None,
            buttons: PointerButtons::NONE,
            hover: None,
            show_reset_confirmation: false,
            status: None,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn hover(&self) -> Option<Point> {
        self.hover
    }

    /// Reset goes through a confirmation window first
    pub fn request_reset(&mut self) {
        self.show_reset_confirmation = true;
    }

    /// Writes the flattened image; the format follows the file extension
    pub fn save(&mut self) -> EditorResult<()> {
        self.editor.flatten().save(&self.output)?;
        info!("Saved {}", self.output.display());
        self.status = Some(format!("Saved {}", self.output.display()));
        Ok(())
    }

    pub fn copy_to_clipboard(&mut self) -> EditorResult<()> {
        let image = self.editor.flatten();
        let data = arboard::ImageData {
            width: image.width() as usize,
            height: image.height() as usize,
            bytes: Cow::Owned(image.into_raw()),
        };
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_image(data))
            .map_err(|err| EditorError::Clipboard(err.to_string()))?;

        info!("Copied image to clipboard");
        self.status = Some("Copied to clipboard".to_owned());
        Ok(())
    }

    fn report(&mut self, result: EditorResult<()>) {
        if let Err(err) = result {
            warn!("{err}");
            self.status = Some(err.to_string());
        }
    }

    /// Texture of the current display image, re-uploaded when it changed
    pub(crate) fn texture(&mut self, ctx: &egui::Context) -> TextureHandle {
        let changed = self.editor.take_view_invalidation();
        if let (Some(texture), false) = (&self.texture, changed) {
            return texture.clone();
        }

        let image = self.editor.display_image();
        let size = [image.width() as usize, image.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        let texture = match self.texture.take() {
            Some(mut texture) => {
                texture.set(color_image, TextureOptions::NEAREST);
                texture
            }
            None => ctx.load_texture("screenmark-canvas", color_image, TextureOptions::NEAREST),
        };
        self.texture = Some(texture.clone());
        texture
    }

    /// Routes this frame's pointer events over `canvas` (screen rect, painted on `layer`)
    /// to the editor. `scale` is screen pixels per image pixel. Returns true if anything
    /// was routed.
    ///
    /// Presses only start on the canvas when no window or popup covers that spot, and
    /// never while the reset confirmation is open.
    pub(crate) fn handle_canvas_input(
        &mut self,
        ctx: &egui::Context,
        canvas: egui::Rect,
        layer: egui::LayerId,
        scale: f32,
    ) -> bool {
        let mut routed = false;
        let canvas_on_top =
            |pos: egui::Pos2| ctx.layer_id_at(pos).is_none_or(|top| top == layer);
        let to_image = |pos: egui::Pos2| Point::from(((pos - canvas.min) / scale).to_pos2());
        let events = ctx.input(|input| input.events.clone());

        for event in events {
            match event {
                Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    let buttons = PointerButtons::from(button);
                    let point = to_image(pos);
                    if pressed {
                        if self.show_reset_confirmation
                            || !canvas.contains(pos)
                            || !canvas_on_top(pos)
                        {
                            continue;
                        }
                        self.buttons = self.buttons | buttons;
                        self.editor.handle_pointer_down(PointerEvent::new(point, buttons));
                        routed = true;
                    } else if self.buttons.contains(buttons) {
                        self.buttons = PointerButtons::NONE;
                        self.editor.handle_pointer_up(PointerEvent::new(point, buttons));
                        routed = true;
                    }
                }
                Event::PointerMoved(pos) => {
                    let point = to_image(pos);
                    self.hover = canvas.contains(pos).then_some(point);
                    self.editor.handle_pointer_move(PointerEvent::new(point, self.buttons));
                    routed = true;
                }
                Event::PointerGone => self.hover = None,
                _ => {}
            }
        }
        routed
    }

    /// Keyboard shortcuts and typed text, skipped while a panel widget has focus
    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let events = ctx.input(|input| input.events.clone());
        for event in events {
            match event {
                Event::Copy => {
                    let result = self.copy_to_clipboard();
                    self.report(result);
                }
                Event::Key {
                    key: egui::Key::S,
                    pressed: true,
                    modifiers,
                    ..
                } if modifiers.command => {
                    let result = self.save();
                    self.report(result);
                }
                Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => {
                    self.editor.handle_key(KeyEvent::new(key, modifiers));
                }
                Event::Text(text) => {
                    self.editor.handle_text(&text);
                }
                Event::WindowFocused(false) => self.editor.focus_lost(),
                _ => {}
            }
        }
    }

    fn reset_confirmation(&mut self, ctx: &egui::Context) {
        if !self.show_reset_confirmation {
            return;
        }

        egui::Window::new("Reset annotations?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("This removes every annotation and clears undo history.");
                ui.horizontal(|ui| {
                    if ui.button("Reset").clicked() {
                        self.editor.reset();
                        self.show_reset_confirmation = false;
                    }
                    if ui.button("Cancel").clicked() {
                        self.show_reset_confirmation = false;
                    }
                });
            });
    }
}

impl AnnotateApp {
    /// One frame of UI
    pub(crate) fn show(&mut self, ctx: &egui::Context) {
        self.handle_keyboard(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
        self.reset_confirmation(ctx);
    }
}

impl eframe::App for AnnotateApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    const SCREEN_CENTER: egui::Pos2 = egui::pos2(400.0, 300.0);

    fn create_test_app() -> AnnotateApp {
        // Large enough that the canvas sits under the middle of the window
        let editor = Editor::new(RgbaImage::new(600, 560)).unwrap();
        let mut app = AnnotateApp::new(editor, PathBuf::from("unused.png"));
        app.editor_mut().set_active_tool("stamp").unwrap();
        app
    }

    fn run_frame(app: &mut AnnotateApp, ctx: &egui::Context, events: Vec<Event>) {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(800.0, 600.0),
            )),
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| app.show(ctx));
    }

    fn press_at(pos: egui::Pos2) -> Vec<Event> {
        vec![
            Event::PointerMoved(pos),
            Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: true,
                modifiers: egui::Modifiers::default(),
            },
        ]
    }

    #[test]
    fn test_press_on_canvas_reaches_tool() {
        let ctx = egui::Context::default();
        let mut app = create_test_app();
        run_frame(&mut app, &ctx, Vec::new());
        run_frame(&mut app, &ctx, press_at(SCREEN_CENTER));
        assert_eq!(app.editor().elements().len(), 1);
    }

    #[test]
    fn test_press_under_reset_dialog_does_not_reach_tool() {
        let ctx = egui::Context::default();
        let mut app = create_test_app();
        app.request_reset();
        for _ in 0..3 {
            run_frame(&mut app, &ctx, Vec::new());
        }
        run_frame(&mut app, &ctx, press_at(SCREEN_CENTER));
        assert!(app.editor().elements().is_empty());
    }
}
