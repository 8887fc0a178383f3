use egui::{CursorIcon, Key};
use log::debug;

use super::{Tool, ToolKind};
use crate::canvas::Canvas;
use crate::element::{TEXT_PADDING, TEXT_SHADOW_COLOR, TEXT_SHADOW_OFFSET, factory};
use crate::geometry::{Point, Rect};
use crate::input::{KeyEvent, PointerEvent};
use crate::state::EditorContext;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TextState {
    #[default]
    Idle,
    /// Capturing typed text for a block anchored at `anchor`
    Editing { anchor: Point, buffer: String },
}

/// Click to place a text block, type, then Enter to commit
#[derive(Debug, Clone, Default)]
pub struct TextTool {
    state: TextState,
}

impl TextTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TextState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, TextState::Editing { .. })
    }

    /// Text typed so far, while editing
    pub fn pending_text(&self) -> Option<&str> {
        match &self.state {
            TextState::Editing { buffer, .. } => Some(buffer),
            TextState::Idle => None,
        }
    }

    /// Turns the pending text into an element. Blank text is dropped.
    pub fn commit(&mut self, ctx: &mut EditorContext) {
        let TextState::Editing { anchor, buffer } = std::mem::take(&mut self.state) else {
            return;
        };
        ctx.invalidate_view();

        if buffer.trim().is_empty() {
            debug!("Ignoring blank text at {anchor:?}");
            return;
        }

        let element = factory::create_text(
            &buffer,
            anchor,
            ctx.color,
            &ctx.font,
            &ctx.fonts,
            ctx.text_shadow,
        );
        debug!("Committing text at {anchor:?}");
        ctx.commit_element(element);
    }

    /// Losing keyboard focus keeps what was typed
    pub fn focus_lost(&mut self, ctx: &mut EditorContext) {
        self.commit(ctx);
    }
}

impl Tool for TextTool {
    fn name(&self) -> &'static str {
        "Text"
    }

    fn kind(&self) -> ToolKind {
        ToolKind::Text
    }

    fn cancel(&mut self, ctx: &mut EditorContext) -> bool {
        if !self.is_editing() {
            return false;
        }
        debug!("Text capture cancelled");
        self.state = TextState::Idle;
        ctx.invalidate_view();
        true
    }

    fn on_pointer_down(&mut self, event: PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() {
            return;
        }
        // Clicking elsewhere finishes the current block first
        self.commit(ctx);
        self.state = TextState::Editing {
            anchor: event.position,
            buffer: String::new(),
        };
        ctx.invalidate_view();
    }

    fn on_pointer_move(&mut self, _event: PointerEvent, _ctx: &mut EditorContext) {}

    fn on_pointer_up(&mut self, _event: PointerEvent, _ctx: &mut EditorContext) {}

    fn on_key(&mut self, key: KeyEvent, ctx: &mut EditorContext) -> bool {
        let TextState::Editing { buffer, .. } = &mut self.state else {
            return false;
        };

        match key.key {
            Key::Enter if key.modifiers.shift => buffer.push('\n'),
            Key::Enter => {
                self.commit(ctx);
                return true;
            }
            Key::Escape => {
                self.cancel(ctx);
                return true;
            }
            Key::Backspace => {
                buffer.pop();
            }
            // Everything else while typing belongs to the text box
            _ => return !key.modifiers.command,
        }
        ctx.invalidate_view();
        true
    }

    fn on_text(&mut self, text: &str, ctx: &mut EditorContext) -> bool {
        let TextState::Editing { buffer, .. } = &mut self.state else {
            return false;
        };
        buffer.extend(text.chars().filter(|ch| !ch.is_control()));
        ctx.invalidate_view();
        true
    }

    /// Pending text, a frame around it and a caret after the last character
    fn on_paint(&self, ctx: &EditorContext, canvas: &mut Canvas) {
        let TextState::Editing { anchor, buffer } = &self.state else {
            return;
        };

        let inset = (TEXT_PADDING / 2) as f32;
        let origin = (anchor.x as f32 + inset, anchor.y as f32 + inset);
        if !buffer.is_empty() {
            if ctx.text_shadow {
                let offset = TEXT_SHADOW_OFFSET as f32;
                let shadow_origin = (origin.0 + offset, origin.1 + offset);
                canvas.draw_text(buffer, shadow_origin, &ctx.font, TEXT_SHADOW_COLOR);
            }
            canvas.draw_text(buffer, origin, &ctx.font, ctx.color);
        }

        let fonts = &ctx.fonts;
        let metrics = fonts.measure(buffer, &ctx.font);
        let line_height = fonts.line_height(&ctx.font);
        let last_line = buffer.rsplit('\n').next().unwrap_or_default();
        let (_, last_width) = fonts.layout_line(&ctx.font, last_line);

        let caret_x = (origin.0 + last_width).round() as i32;
        let caret_top = (origin.1 + line_height * (metrics.line_count - 1) as f32).round() as i32;
        let caret_bottom = caret_top + line_height.ceil() as i32;
        let caret = Rect::from_ltrb(caret_x, caret_top, caret_x + 1, caret_bottom);
        canvas.fill_rect(caret, ctx.color);

        let frame = Rect::from_origin_size(
            *anchor,
            metrics.width.ceil() as i32 + TEXT_PADDING,
            metrics.height.ceil() as i32 + TEXT_PADDING,
        );
        canvas.stroke_rect(frame, ctx.color);
    }

    fn cursor(&self, _ctx: &EditorContext, _pointer: Option<Point>) -> CursorIcon {
        CursorIcon::Text
    }

    fn current_state_name(&self) -> &'static str {
        match self.state {
            TextState::Idle => "idle",
            TextState::Editing { .. } => "editing",
        }
    }
}
