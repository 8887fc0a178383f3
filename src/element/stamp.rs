use egui::Color32;

use super::common::{
    self, STAMP_DIAMETER, STAMP_HIT_SLACK, STAMP_LABEL_SIZE, STAMP_SHADOW_COLOR,
    STAMP_SHADOW_OFFSET,
};
use super::{Element, ElementId};
use crate::canvas::Canvas;
use crate::font::FontSpec;
use crate::geometry::{Point, Rect};

/// Filled disc with a white sequence number in the middle
#[derive(Debug, Clone, PartialEq)]
pub struct NumberStamp {
    id: ElementId,
    number: u32,
    center: Point,
    color: Color32,
    selected: bool,
}

impl NumberStamp {
    pub fn new(number: u32, center: Point, color: Color32) -> Self {
        Self {
            id: ElementId::new(),
            number,
            center,
            color,
            selected: false,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    fn radius() -> f32 {
        STAMP_DIAMETER as f32 / 2.0
    }
}

impl Element for NumberStamp {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "number_stamp"
    }

    fn bounds(&self) -> Rect {
        // The whole grab disc, plus one pixel for the exclusive right and bottom edges.
        // Wide enough for the shadow and its anti-aliasing too.
        Rect::centered(self.center, STAMP_DIAMETER + 2 * (STAMP_HIT_SLACK + 1))
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn draw(&self, canvas: &mut Canvas) {
        let (cx, cy) = common::to_f32(self.center);
        let shadow = STAMP_SHADOW_OFFSET as f32;
        canvas.fill_circle((cx + shadow, cy + shadow), Self::radius(), STAMP_SHADOW_COLOR);
        canvas.fill_circle((cx, cy), Self::radius(), self.color);
        canvas.draw_text_centered(
            &self.number.to_string(),
            (cx, cy),
            &FontSpec::proportional(STAMP_LABEL_SIZE),
            Color32::WHITE,
        );
        if self.selected {
            common::draw_selection_handles(canvas, self.bounds());
        }
    }

    fn contains(&self, point: Point) -> bool {
        if !self.bounds().contains(point) {
            return false;
        }
        let dx = (point.x - self.center.x) as f32;
        let dy = (point.y - self.center.y) as f32;
        (dx * dx + dy * dy).sqrt() <= Self::radius() + STAMP_HIT_SLACK as f32
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.center = self.center.offset(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_radius_includes_slack() {
        let stamp = NumberStamp::new(1, Point::new(50, 50), Color32::RED);
        assert!(stamp.contains(Point::new(66, 50)));
        assert!(!stamp.contains(Point::new(67, 50)));
        assert!(stamp.bounds().contains(Point::new(66, 50)));
    }

    #[test]
    fn test_bounds_centered_on_stamp() {
        let stamp = NumberStamp::new(7, Point::new(50, 50), Color32::RED);
        assert_eq!(stamp.bounds(), Rect::from_ltrb(33, 33, 67, 67));
    }
}
