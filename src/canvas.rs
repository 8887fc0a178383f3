//! Raster painting surface.
//!
//! Shapes are painted by evaluating a signed distance function per pixel and
//! turning it into anti-aliased coverage, then blending the colour over the
//! existing pixel. Text goes through `ab_glyph` outlines.

use ab_glyph::{Font, point};
use egui::Color32;
use image::RgbaImage;

use crate::font::{FontBook, FontSpec};
use crate::geometry::Rect;
use crate::geometry::hit_testing::{
    distance_to_segment, effective_corner_radius, sdf_convex_polygon, sdf_rounded_box,
};

/// Paints annotations into an RGBA buffer
pub struct Canvas<'a> {
    image: &'a mut RgbaImage,
    fonts: &'a FontBook,
}

impl<'a> Canvas<'a> {
    pub fn new(image: &'a mut RgbaImage, fonts: &'a FontBook) -> Self {
        Self { image, fonts }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn fonts(&self) -> &'a FontBook {
        self.fonts
    }

    pub fn clear(&mut self, color: Color32) {
        let rgba = image::Rgba(color.to_srgba_unmultiplied());
        for pixel in self.image.pixels_mut() {
            *pixel = rgba;
        }
    }

    /// Copies `source` into the top-left corner, replacing what is there
    pub fn blit(&mut self, source: &RgbaImage) {
        image::imageops::replace(self.image, source, 0, 0);
    }

    /// Source-over blend of `color` at `coverage` (0..=1) into one pixel.
    /// Pixels outside the buffer are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color32, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }

        let [sr, sg, sb, sa] = color.to_srgba_unmultiplied();
        let alpha = sa as f32 / 255.0 * coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        let dst_alpha = pixel[3] as f32 / 255.0;
        let out_alpha = alpha + dst_alpha * (1.0 - alpha);
        if out_alpha <= 0.0 {
            return;
        }

        for (channel, src) in [sr, sg, sb].into_iter().enumerate() {
            let dst = pixel[channel] as f32;
            let value = (src as f32 * alpha + dst * dst_alpha * (1.0 - alpha)) / out_alpha;
            pixel[channel] = value.round().clamp(0.0, 255.0) as u8;
        }
        pixel[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    /// Solid, non anti-aliased fill
    pub fn fill_rect(&mut self, rect: Rect, color: Color32) {
        for y in rect.top..rect.bottom {
            for x in rect.left..rect.right {
                self.blend_pixel(x, y, color, 1.0);
            }
        }
    }

    /// One pixel border just inside `rect`
    pub fn stroke_rect(&mut self, rect: Rect, color: Color32) {
        if rect.is_empty() {
            return;
        }
        for x in rect.left..rect.right {
            self.blend_pixel(x, rect.top, color, 1.0);
            self.blend_pixel(x, rect.bottom - 1, color, 1.0);
        }
        for y in rect.top + 1..rect.bottom - 1 {
            self.blend_pixel(rect.left, y, color, 1.0);
            self.blend_pixel(rect.right - 1, y, color, 1.0);
        }
    }

    /// Paints every pixel of `area` whose centre is inside (or within half a
    /// pixel of) the shape described by `sdf`
    fn fill_sdf(&mut self, area: (f32, f32, f32, f32), color: Color32, sdf: impl Fn(f32, f32) -> f32) {
        let (min_x, min_y, max_x, max_y) = area;
        let x0 = (min_x.floor() as i32 - 1).max(0);
        let y0 = (min_y.floor() as i32 - 1).max(0);
        let x1 = (max_x.ceil() as i32 + 1).min(self.width() as i32);
        let y1 = (max_y.ceil() as i32 + 1).min(self.height() as i32);

        for y in y0..y1 {
            for x in x0..x1 {
                let d = sdf(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = smoothstep(0.5, -0.5, d);
                if coverage > 0.001 {
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    /// Line with round caps
    pub fn stroke_segment(&mut self, a: (f32, f32), b: (f32, f32), width: f32, color: Color32) {
        let half = width / 2.0;
        let area = (
            a.0.min(b.0) - half,
            a.1.min(b.1) - half,
            a.0.max(b.0) + half,
            a.1.max(b.1) + half,
        );
        self.fill_sdf(area, color, |px, py| distance_to_segment(px, py, a, b) - half);
    }

    pub fn fill_polygon(&mut self, vertices: &[(f32, f32)], color: Color32) {
        if vertices.len() < 3 {
            return;
        }
        let mut area = (f32::MAX, f32::MAX, f32::MIN, f32::MIN);
        for &(x, y) in vertices {
            area.0 = area.0.min(x);
            area.1 = area.1.min(y);
            area.2 = area.2.max(x);
            area.3 = area.3.max(y);
        }
        self.fill_sdf(area, color, |px, py| sdf_convex_polygon(vertices, px, py));
    }

    pub fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Color32) {
        let area = (
            center.0 - radius,
            center.1 - radius,
            center.0 + radius,
            center.1 + radius,
        );
        self.fill_sdf(area, color, |px, py| {
            ((px - center.0).powi(2) + (py - center.1).powi(2)).sqrt() - radius
        });
    }

    /// Outline of `rect` with rounded corners, the stroke centred on the rectangle's edges
    pub fn stroke_rounded_rect(&mut self, rect: Rect, radius: i32, width: i32, color: Color32) {
        let half_stroke = width.max(1) as f32 / 2.0;
        let hx = rect.width() as f32 / 2.0;
        let hy = rect.height() as f32 / 2.0;
        let cx = rect.left as f32 + hx;
        let cy = rect.top as f32 + hy;
        let r = effective_corner_radius(&rect, radius) as f32;

        let area = (
            rect.left as f32 - half_stroke,
            rect.top as f32 - half_stroke,
            rect.right as f32 + half_stroke,
            rect.bottom as f32 + half_stroke,
        );
        self.fill_sdf(area, color, |px, py| {
            sdf_rounded_box(px - cx, py - cy, hx, hy, r).abs() - half_stroke
        });
    }

    /// Draws possibly multi-line text with its first line's top at `origin`
    pub fn draw_text(&mut self, text: &str, origin: (f32, f32), spec: &FontSpec, color: Color32) {
        let fonts = self.fonts;
        let font = fonts.font(spec);
        let ascent = fonts.ascent(spec);
        let line_height = fonts.line_height(spec);

        for (index, line) in text.split('\n').enumerate() {
            let baseline = origin.1 + ascent + index as f32 * line_height;
            let (glyphs, _) = fonts.layout_line(spec, line);

            for (id, x) in glyphs {
                let glyph = id.with_scale_and_position(spec.size, point(origin.0 + x, baseline));
                let Some(outlined) = font.outline_glyph(glyph) else {
                    continue;
                };
                let bounds = outlined.px_bounds();
                let left = bounds.min.x as i32;
                let top = bounds.min.y as i32;
                outlined.draw(|gx, gy, coverage| {
                    self.blend_pixel(left + gx as i32, top + gy as i32, color, coverage);
                });
            }
        }
    }

    /// Draws a single line of text centred on `center`
    pub fn draw_text_centered(
        &mut self,
        text: &str,
        center: (f32, f32),
        spec: &FontSpec,
        color: Color32,
    ) {
        let metrics = self.fonts.measure(text, spec);
        let origin = (
            center.0 - metrics.width / 2.0,
            center.1 - metrics.height / 2.0,
        );
        self.draw_text(text, origin, spec, color);
    }
}

/// Smoothstep between edge0 and edge1.
#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn test_opaque_blend_replaces_pixel() {
        let fonts = FontBook::with_default_fonts().unwrap();
        let mut image = blank(4, 4);
        let mut canvas = Canvas::new(&mut image, &fonts);
        canvas.blend_pixel(1, 1, Color32::RED, 1.0);
        assert_eq!(image.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_half_alpha_blend_mixes() {
        let fonts = FontBook::with_default_fonts().unwrap();
        let mut image = blank(4, 4);
        let mut canvas = Canvas::new(&mut image, &fonts);
        canvas.blend_pixel(0, 0, Color32::from_rgba_unmultiplied(0, 0, 0, 128), 1.0);
        let pixel = image.get_pixel(0, 0).0;
        assert!(pixel[0] > 120 && pixel[0] < 135, "got {pixel:?}");
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let fonts = FontBook::with_default_fonts().unwrap();
        let mut image = blank(2, 2);
        let mut canvas = Canvas::new(&mut image, &fonts);
        canvas.blend_pixel(-1, 0, Color32::RED, 1.0);
        canvas.blend_pixel(2, 2, Color32::RED, 1.0);
        assert!(image.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_segment_covers_its_midpoint_only() {
        let fonts = FontBook::with_default_fonts().unwrap();
        let mut image = blank(40, 20);
        let mut canvas = Canvas::new(&mut image, &fonts);
        canvas.stroke_segment((5.0, 10.0), (35.0, 10.0), 4.0, Color32::BLUE);
        assert_eq!(image.get_pixel(20, 9).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(20, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_text_leaves_ink() {
        let fonts = FontBook::with_default_fonts().unwrap();
        let mut image = blank(80, 30);
        let mut canvas = Canvas::new(&mut image, &fonts);
        canvas.draw_text("Hi", (4.0, 4.0), &FontSpec::default(), Color32::BLACK);
        assert!(image.pixels().any(|p| p.0[0] < 128));
    }
}
