use crate::app::AnnotateApp;

/// The annotated image, scaled down to fit when it is larger than the panel
pub fn central_panel(app: &mut AnnotateApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let texture = app.texture(ctx);
        let image_size = texture.size_vec2();
        let available = ui.available_size();
        let scale = (available.x / image_size.x)
            .min(available.y / image_size.y)
            .min(1.0)
            .max(f32::EPSILON);

        let (response, painter) =
            ui.allocate_painter(image_size * scale, egui::Sense::click_and_drag());
        let canvas_rect = response.rect;
        painter.image(
            texture.id(),
            canvas_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        if app.handle_canvas_input(ctx, canvas_rect, response.layer_id, scale) {
            // Show this frame's edits on the next frame
            ctx.request_repaint();
        }

        if response.hovered() {
            let cursor = app.editor().cursor(app.hover());
            ctx.set_cursor_icon(cursor);
        }
    });
}
