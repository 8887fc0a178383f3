use egui::Color32;

use super::common::{self, DEFAULT_CORNER_RADIUS};
use super::{Element, ElementId};
use crate::canvas::Canvas;
use crate::geometry::hit_testing::{distance_to_rect_outline, outline_hit_radius};
use crate::geometry::{Point, Rect};

/// Rounded rectangle outline
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleElement {
    id: ElementId,
    rect: Rect,
    color: Color32,
    width: i32,
    corner_radius: i32,
    selected: bool,
}

impl RectangleElement {
    pub fn new(rect: Rect, color: Color32, width: i32) -> Self {
        Self {
            id: ElementId::new(),
            rect,
            color,
            width: width.max(1),
            corner_radius: DEFAULT_CORNER_RADIUS,
            selected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn corner_radius(&self) -> i32 {
        self.corner_radius
    }
}

impl Element for RectangleElement {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "rectangle"
    }

    fn bounds(&self) -> Rect {
        self.rect.inflate(self.width)
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.stroke_rounded_rect(self.rect, self.corner_radius, self.width, self.color);
        if self.selected {
            common::draw_selection_handles(canvas, self.bounds());
        }
    }

    /// Only the outline counts; clicking inside an empty box goes through to what is beneath.
    /// The grab band is cut off at the bounds.
    fn contains(&self, point: Point) -> bool {
        if !self.bounds().contains(point) {
            return false;
        }
        let (px, py) = common::to_f32(point);
        distance_to_rect_outline(px, py, &self.rect, self.corner_radius)
            <= outline_hit_radius(self.width)
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.rect = self.rect.translate(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_hit_but_not_interior() {
        let rect = RectangleElement::new(Rect::from_ltrb(10, 10, 110, 60), Color32::RED, 2);
        assert!(rect.contains(Point::new(60, 10)));
        assert!(rect.contains(Point::new(60, 13)));
        assert!(!rect.contains(Point::new(60, 35)));
    }

    #[test]
    fn test_thin_outline_grab_band_stops_at_bounds() {
        let rect = RectangleElement::new(Rect::from_ltrb(10, 10, 110, 60), Color32::RED, 2);
        assert_eq!(rect.bounds(), Rect::from_ltrb(8, 8, 112, 62));
        assert!(rect.contains(Point::new(60, 8)));
        assert!(!rect.contains(Point::new(60, 6)));
        assert!(!rect.contains(Point::new(112, 30)));
    }

    #[test]
    fn test_bounds_inflate_by_width() {
        let rect = RectangleElement::new(Rect::from_ltrb(10, 10, 110, 60), Color32::RED, 4);
        assert_eq!(rect.bounds(), Rect::from_ltrb(6, 6, 114, 64));
    }
}
