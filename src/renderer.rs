use egui::Color32;
use image::RgbaImage;
use log::trace;

use crate::canvas::Canvas;
use crate::font::FontBook;
use crate::scene::Scene;

/// Owns the untouched source image and the working buffer elements are painted into.
///
/// Every render rewrites the whole working buffer: clear, copy the source,
/// then paint each element in order.
#[derive(Debug)]
pub struct Renderer {
    original: RgbaImage,
    working: RgbaImage,
    background: Color32,
    needs_redraw: bool,
}

impl Renderer {
    pub fn new(original: RgbaImage, background: Color32) -> Self {
        let working = original.clone();
        Self {
            original,
            working,
            background,
            needs_redraw: true,
        }
    }

    pub fn original(&self) -> &RgbaImage {
        &self.original
    }

    pub fn working(&self) -> &RgbaImage {
        &self.working
    }

    pub fn width(&self) -> u32 {
        self.original.width()
    }

    pub fn height(&self) -> u32 {
        self.original.height()
    }

    /// Full repaint of the working buffer. Flags the view for redraw.
    pub fn render(&mut self, scene: &Scene, fonts: &FontBook) {
        let mut canvas = Canvas::new(&mut self.working, fonts);
        canvas.clear(self.background);
        canvas.blit(&self.original);
        scene.draw(&mut canvas);

        trace!("Rendered {} elements", scene.len());
        self.needs_redraw = true;
    }

    /// True once after each render; the view calls this to decide whether to re-upload
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
