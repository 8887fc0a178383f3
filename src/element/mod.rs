use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::canvas::Canvas;
use crate::geometry::{HandlePosition, Point, Rect, handles};

pub mod arrow;
pub(crate) mod common;
pub mod rectangle;
pub mod stamp;
pub mod text;

pub use arrow::Arrow;
pub use common::{
    DEFAULT_CORNER_RADIUS, STAMP_DIAMETER, TEXT_PADDING, TEXT_SHADOW_COLOR, TEXT_SHADOW_OFFSET,
};
pub use rectangle::RectangleElement;
pub use stamp::NumberStamp;
pub use text::{ShadowedTextElement, TextElement};

/// Stable identity of an element; survives moves and snapshot copies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Common trait that every annotation element implements
pub trait Element {
    fn id(&self) -> ElementId;

    /// Short lowercase name of the element kind
    fn element_type(&self) -> &'static str;

    /// Box holding every pixel the element paints; derived from geometry on each call
    fn bounds(&self) -> Rect;

    fn is_selected(&self) -> bool;

    fn set_selected(&mut self, selected: bool);

    /// Paints the element, plus its selection handles when selected
    fn draw(&self, canvas: &mut Canvas);

    /// Hit test with the element's grab tolerance applied
    fn contains(&self, point: Point) -> bool;

    fn translate(&mut self, dx: i32, dy: i32);

    /// Handle under `point`. Always `None` for an unselected element.
    fn handle_at(&self, point: Point) -> Option<HandlePosition> {
        if !self.is_selected() {
            return None;
        }
        handles::handle_at(&self.bounds(), point)
    }
}

/// Closed set of element kinds the editor knows about
#[derive(Debug, Clone, PartialEq)]
pub enum ElementType {
    Arrow(Arrow),
    Rectangle(RectangleElement),
    Text(TextElement),
    ShadowedText(ShadowedTextElement),
    NumberStamp(NumberStamp),
}

impl ElementType {
    pub fn as_stamp(&self) -> Option<&NumberStamp> {
        match self {
            Self::NumberStamp(stamp) => Some(stamp),
            _ => None,
        }
    }

    /// Text content for either text variant
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.text()),
            Self::ShadowedText(text) => Some(text.text()),
            _ => None,
        }
    }
}

impl Element for ElementType {
    fn id(&self) -> ElementId {
        match self {
            Self::Arrow(e) => e.id(),
            Self::Rectangle(e) => e.id(),
            Self::Text(e) => e.id(),
            Self::ShadowedText(e) => e.id(),
            Self::NumberStamp(e) => e.id(),
        }
    }

    fn element_type(&self) -> &'static str {
        match self {
            Self::Arrow(e) => e.element_type(),
            Self::Rectangle(e) => e.element_type(),
            Self::Text(e) => e.element_type(),
            Self::ShadowedText(e) => e.element_type(),
            Self::NumberStamp(e) => e.element_type(),
        }
    }

    fn bounds(&self) -> Rect {
        match self {
            Self::Arrow(e) => e.bounds(),
            Self::Rectangle(e) => e.bounds(),
            Self::Text(e) => e.bounds(),
            Self::ShadowedText(e) => e.bounds(),
            Self::NumberStamp(e) => e.bounds(),
        }
    }

    fn is_selected(&self) -> bool {
        match self {
            Self::Arrow(e) => e.is_selected(),
            Self::Rectangle(e) => e.is_selected(),
            Self::Text(e) => e.is_selected(),
            Self::ShadowedText(e) => e.is_selected(),
            Self::NumberStamp(e) => e.is_selected(),
        }
    }

    fn set_selected(&mut self, selected: bool) {
        match self {
            Self::Arrow(e) => e.set_selected(selected),
            Self::Rectangle(e) => e.set_selected(selected),
            Self::Text(e) => e.set_selected(selected),
            Self::ShadowedText(e) => e.set_selected(selected),
            Self::NumberStamp(e) => e.set_selected(selected),
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        match self {
            Self::Arrow(e) => e.draw(canvas),
            Self::Rectangle(e) => e.draw(canvas),
            Self::Text(e) => e.draw(canvas),
            Self::ShadowedText(e) => e.draw(canvas),
            Self::NumberStamp(e) => e.draw(canvas),
        }
    }

    fn contains(&self, point: Point) -> bool {
        match self {
            Self::Arrow(e) => e.contains(point),
            Self::Rectangle(e) => e.contains(point),
            Self::Text(e) => e.contains(point),
            Self::ShadowedText(e) => e.contains(point),
            Self::NumberStamp(e) => e.contains(point),
        }
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        match self {
            Self::Arrow(e) => e.translate(dx, dy),
            Self::Rectangle(e) => e.translate(dx, dy),
            Self::Text(e) => e.translate(dx, dy),
            Self::ShadowedText(e) => e.translate(dx, dy),
            Self::NumberStamp(e) => e.translate(dx, dy),
        }
    }
}

/// Factory functions for creating elements
pub mod factory {
    use egui::Color32;

    use super::*;
    use crate::font::{FontBook, FontSpec};

    pub fn create_arrow(start: Point, end: Point, color: Color32, width: i32) -> ElementType {
        ElementType::Arrow(Arrow::new(start, end, color, width))
    }

    pub fn create_rectangle(rect: Rect, color: Color32, width: i32) -> ElementType {
        ElementType::Rectangle(RectangleElement::new(rect, color, width))
    }

    /// Plain or shadowed text, measured with `fonts`
    pub fn create_text(
        text: &str,
        anchor: Point,
        color: Color32,
        font: &FontSpec,
        fonts: &FontBook,
        shadowed: bool,
    ) -> ElementType {
        if shadowed {
            ElementType::ShadowedText(ShadowedTextElement::new(text, anchor, color, font, fonts))
        } else {
            ElementType::Text(TextElement::new(text, anchor, color, font, fonts))
        }
    }

    pub fn create_stamp(number: u32, center: Point, color: Color32) -> ElementType {
        ElementType::NumberStamp(NumberStamp::new(number, center, color))
    }
}
