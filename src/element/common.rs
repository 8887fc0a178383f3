use egui::Color32;

use crate::canvas::Canvas;
use crate::geometry::{HandlePosition, Rect};

/// Corner radius for rectangles, before clamping to the rectangle's size
pub const DEFAULT_CORNER_RADIUS: i32 = 10;
/// Room around a text block's measured size
pub const TEXT_PADDING: i32 = 8;
pub const TEXT_SHADOW_OFFSET: i32 = 2;
pub const TEXT_SHADOW_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 128);

pub const STAMP_DIAMETER: i32 = 26;
pub const STAMP_SHADOW_OFFSET: i32 = 2;
pub const STAMP_SHADOW_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 100);
/// Extra grab distance around the stamp disc
pub const STAMP_HIT_SLACK: i32 = 3;
pub const STAMP_LABEL_SIZE: f32 = 14.0;

/// Arrow bounds are padded by this many stroke widths to make room for the head
pub const ARROW_PADDING_FACTOR: i32 = 3;

/// White squares with a black border centred on the eight handle points
pub(crate) fn draw_selection_handles(canvas: &mut Canvas, bounds: Rect) {
    for handle in HandlePosition::ALL {
        let rect = handle.handle_rect(&bounds);
        canvas.fill_rect(rect, Color32::WHITE);
        canvas.stroke_rect(rect, Color32::BLACK);
    }
}

pub(crate) fn to_f32(point: crate::geometry::Point) -> (f32, f32) {
    (point.x as f32, point.y as f32)
}
