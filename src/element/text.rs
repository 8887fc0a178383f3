use egui::Color32;

use super::common::{self, TEXT_PADDING, TEXT_SHADOW_COLOR, TEXT_SHADOW_OFFSET};
use super::{Element, ElementId};
use crate::canvas::Canvas;
use crate::font::{FontBook, FontSpec};
use crate::geometry::{Point, Rect};

/// Text content plus the size it measured to when created.
///
/// Both text variants wrap one of these; the size is measured once, since
/// neither the string nor the font change after creation.
#[derive(Debug, Clone, PartialEq)]
struct TextBlock {
    id: ElementId,
    text: String,
    anchor: Point,
    color: Color32,
    font: FontSpec,
    text_width: i32,
    text_height: i32,
    selected: bool,
}

impl TextBlock {
    fn new(text: &str, anchor: Point, color: Color32, font: &FontSpec, fonts: &FontBook) -> Self {
        let metrics = fonts.measure(text, font);
        Self {
            id: ElementId::new(),
            text: text.to_owned(),
            anchor,
            color,
            font: font.clone(),
            text_width: metrics.width.ceil() as i32,
            text_height: metrics.height.ceil() as i32,
            selected: false,
        }
    }

    /// Padded box of the text itself, anchored at the top-left
    fn text_box(&self) -> Rect {
        Rect::from_origin_size(
            self.anchor,
            self.text_width + TEXT_PADDING,
            self.text_height + TEXT_PADDING,
        )
    }

    fn text_origin(&self) -> (f32, f32) {
        let inset = (TEXT_PADDING / 2) as f32;
        (self.anchor.x as f32 + inset, self.anchor.y as f32 + inset)
    }
}

/// Plain single- or multi-line text
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    block: TextBlock,
}

impl TextElement {
    pub fn new(text: &str, anchor: Point, color: Color32, font: &FontSpec, fonts: &FontBook) -> Self {
        Self {
            block: TextBlock::new(text, anchor, color, font, fonts),
        }
    }

    pub fn text(&self) -> &str {
        &self.block.text
    }

    pub fn anchor(&self) -> Point {
        self.block.anchor
    }

    pub fn font(&self) -> &FontSpec {
        &self.block.font
    }

    pub fn color(&self) -> Color32 {
        self.block.color
    }
}

impl Element for TextElement {
    fn id(&self) -> ElementId {
        self.block.id
    }

    fn element_type(&self) -> &'static str {
        "text"
    }

    fn bounds(&self) -> Rect {
        self.block.text_box()
    }

    fn is_selected(&self) -> bool {
        self.block.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.block.selected = selected;
    }

    fn draw(&self, canvas: &mut Canvas) {
        let block = &self.block;
        canvas.draw_text(&block.text, block.text_origin(), &block.font, block.color);
        if block.selected {
            common::draw_selection_handles(canvas, self.bounds());
        }
    }

    fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.block.anchor = self.block.anchor.offset(dx, dy);
    }
}

/// Text with a soft black drop shadow, readable on any background
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowedTextElement {
    block: TextBlock,
}

impl ShadowedTextElement {
    pub fn new(text: &str, anchor: Point, color: Color32, font: &FontSpec, fonts: &FontBook) -> Self {
        Self {
            block: TextBlock::new(text, anchor, color, font, fonts),
        }
    }

    pub fn text(&self) -> &str {
        &self.block.text
    }

    pub fn anchor(&self) -> Point {
        self.block.anchor
    }

    pub fn font(&self) -> &FontSpec {
        &self.block.font
    }

    pub fn color(&self) -> Color32 {
        self.block.color
    }
}

impl Element for ShadowedTextElement {
    fn id(&self) -> ElementId {
        self.block.id
    }

    fn element_type(&self) -> &'static str {
        "shadowed_text"
    }

    fn bounds(&self) -> Rect {
        let text_box = self.block.text_box();
        Rect::from_ltrb(
            text_box.left,
            text_box.top,
            text_box.right + TEXT_SHADOW_OFFSET,
            text_box.bottom + TEXT_SHADOW_OFFSET,
        )
    }

    fn is_selected(&self) -> bool {
        self.block.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.block.selected = selected;
    }

    fn draw(&self, canvas: &mut Canvas) {
        let block = &self.block;
        let (x, y) = block.text_origin();
        let offset = TEXT_SHADOW_OFFSET as f32;
        canvas.draw_text(&block.text, (x + offset, y + offset), &block.font, TEXT_SHADOW_COLOR);
        canvas.draw_text(&block.text, (x, y), &block.font, block.color);
        if block.selected {
            common::draw_selection_handles(canvas, self.bounds());
        }
    }

    fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.block.anchor = self.block.anchor.offset(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_widens_bounds() {
        let fonts = FontBook::with_default_fonts().unwrap();
        let spec = FontSpec::default();
        let plain = TextElement::new("Note", Point::new(5, 5), Color32::RED, &spec, &fonts);
        let shadowed =
            ShadowedTextElement::new("Note", Point::new(5, 5), Color32::RED, &spec, &fonts);

        let a = plain.bounds();
        let b = shadowed.bounds();
        assert_eq!(b.width(), a.width() + TEXT_SHADOW_OFFSET);
        assert_eq!(b.height(), a.height() + TEXT_SHADOW_OFFSET);
        assert_eq!(a.origin(), Point::new(5, 5));
    }

    #[test]
    fn test_multiline_text_is_taller() {
        let fonts = FontBook::with_default_fonts().unwrap();
        let spec = FontSpec::default();
        let one = TextElement::new("line", Point::ZERO, Color32::RED, &spec, &fonts);
        let two = TextElement::new("line\nline", Point::ZERO, Color32::RED, &spec, &fonts);
        assert!(two.bounds().height() > one.bounds().height());
        assert_eq!(two.bounds().width(), one.bounds().width());
    }
}
