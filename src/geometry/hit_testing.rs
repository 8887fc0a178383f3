use super::{Point, Rect};

/// Extra pixels added to a stroke's width when hit testing, so thin shapes stay easy to grab
pub const HIT_TOLERANCE: i32 = 6;

/// Half the width of the band around an outline that counts as a hit
pub fn outline_hit_radius(stroke_width: i32) -> f32 {
    (stroke_width + HIT_TOLERANCE) as f32 / 2.0
}

/// Distance from `(px, py)` to the segment `a`-`b`
pub fn distance_to_segment(px: f32, py: f32, a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return ((px - a.0).powi(2) + (py - a.1).powi(2)).sqrt();
    }

    let t = (((px - a.0) * dx + (py - a.1) * dy) / len_sq).clamp(0.0, 1.0);
    let cx = a.0 + t * dx;
    let cy = a.1 + t * dy;
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Signed distance to a box centred at the origin with half-extents `(hx, hy)`.
/// Negative inside.
pub fn sdf_box(px: f32, py: f32, hx: f32, hy: f32) -> f32 {
    let dx = px.abs() - hx;
    let dy = py.abs() - hy;
    let outside = (dx.max(0.0).powi(2) + dy.max(0.0).powi(2)).sqrt();
    let inside = dx.max(dy).min(0.0);
    outside + inside
}

/// Signed distance to a rounded box centred at the origin
pub fn sdf_rounded_box(px: f32, py: f32, hx: f32, hy: f32, radius: f32) -> f32 {
    let r = radius.min(hx).min(hy).max(0.0);
    sdf_box(px, py, hx - r, hy - r) - r
}

/// Corner radius actually used for `rect`: never more than half the shorter side.
/// Radii of one pixel or less collapse to square corners.
pub fn effective_corner_radius(rect: &Rect, radius: i32) -> i32 {
    let r = radius.min(rect.width() / 2).min(rect.height() / 2);
    if r <= 1 { 0 } else { r }
}

/// Unsigned distance from `(px, py)` to the outline of a (possibly rounded) rectangle
pub fn distance_to_rect_outline(px: f32, py: f32, rect: &Rect, radius: i32) -> f32 {
    let hx = rect.width() as f32 / 2.0;
    let hy = rect.height() as f32 / 2.0;
    let cx = rect.left as f32 + hx;
    let cy = rect.top as f32 + hy;
    let r = effective_corner_radius(rect, radius) as f32;
    sdf_rounded_box(px - cx, py - cy, hx, hy, r).abs()
}

/// Signed distance to a convex polygon (negative inside)
pub fn sdf_convex_polygon(vertices: &[(f32, f32)], px: f32, py: f32) -> f32 {
    let n = vertices.len();
    if n == 0 {
        return f32::MAX;
    }
    let mut d = (px - vertices[0].0).powi(2) + (py - vertices[0].1).powi(2);
    let mut sign: f32 = 1.0;
    let mut j = n - 1;
    for i in 0..n {
        let ex = vertices[j].0 - vertices[i].0;
        let ey = vertices[j].1 - vertices[i].1;
        let wx = px - vertices[i].0;
        let wy = py - vertices[i].1;
        let len_sq = ex * ex + ey * ey;
        let t = if len_sq > 0.0 {
            ((wx * ex + wy * ey) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let bx = wx - ex * t;
        let by = wy - ey * t;
        d = d.min(bx * bx + by * by);

        let c1 = py >= vertices[i].1;
        let c2 = py < vertices[j].1;
        let c3 = ex * wy > ey * wx;
        if (c1 && c2 && c3) || (!c1 && !c2 && !c3) {
            sign = -sign;
        }
        j = i;
    }
    sign * d.sqrt()
}

/// True when `point` lies within `tolerance` of `(x, y)` on both axes
pub fn is_point_near(point: Point, x: i32, y: i32, tolerance: i32) -> bool {
    (point.x - x).abs() <= tolerance && (point.y - y).abs() <= tolerance
}
