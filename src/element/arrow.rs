use egui::Color32;

use super::common::{self, ARROW_PADDING_FACTOR};
use super::{Element, ElementId};
use crate::canvas::Canvas;
use crate::geometry::hit_testing::{distance_to_segment, outline_hit_radius, sdf_convex_polygon};
use crate::geometry::{Point, Rect};

/// Straight arrow from `start` to a filled head at `end`
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    id: ElementId,
    start: Point,
    end: Point,
    color: Color32,
    width: i32,
    selected: bool,
}

impl Arrow {
    pub fn new(start: Point, end: Point, color: Color32, width: i32) -> Self {
        Self {
            id: ElementId::new(),
            start,
            end,
            color,
            width: width.max(1),
            selected: false,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> i32 {
        self.width
    }
}

/// Triangle of the arrow head: tip first, then the two base corners.
///
/// The head is `4 * width` long (never longer than the arrow itself) and
/// `4 * width` wide at its base.
pub(crate) fn head_vertices(start: Point, end: Point, width: i32) -> [(f32, f32); 3] {
    let (sx, sy) = common::to_f32(start);
    let (ex, ey) = common::to_f32(end);
    let dx = ex - sx;
    let dy = ey - sy;
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return [(ex, ey); 3];
    }

    let (ux, uy) = (dx / length, dy / length);
    let head_length = (4.0 * width as f32).min(length);
    let half_base = 2.0 * width as f32;
    let bx = ex - ux * head_length;
    let by = ey - uy * head_length;

    [
        (ex, ey),
        (bx - uy * half_base, by + ux * half_base),
        (bx + uy * half_base, by - ux * half_base),
    ]
}

/// Paints an arrow shaft and head. Shared with the arrow tool's live preview.
pub fn paint_arrow(canvas: &mut Canvas, start: Point, end: Point, color: Color32, width: i32) {
    let head = head_vertices(start, end, width);
    // The shaft stops at the head's base so translucent colours do not double up
    let base = ((head[1].0 + head[2].0) / 2.0, (head[1].1 + head[2].1) / 2.0);
    canvas.stroke_segment(common::to_f32(start), base, width as f32, color);
    canvas.fill_polygon(&head, color);
}

impl Element for Arrow {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "arrow"
    }

    fn bounds(&self) -> Rect {
        Rect::from_corners(self.start, self.end).inflate(ARROW_PADDING_FACTOR * self.width)
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn draw(&self, canvas: &mut Canvas) {
        paint_arrow(canvas, self.start, self.end, self.color, self.width);
        if self.selected {
            common::draw_selection_handles(canvas, self.bounds());
        }
    }

    fn contains(&self, point: Point) -> bool {
        if !self.bounds().contains(point) {
            return false;
        }
        let (px, py) = common::to_f32(point);
        let radius = outline_hit_radius(self.width);
        let shaft = distance_to_segment(
            px,
            py,
            common::to_f32(self.start),
            common::to_f32(self.end),
        );
        if shaft <= radius {
            return true;
        }

        let head = head_vertices(self.start, self.end, self.width);
        sdf_convex_polygon(&head, px, py) <= 0.0
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.start = self.start.offset(dx, dy);
        self.end = self.end.offset(dx, dy);
    }
}
