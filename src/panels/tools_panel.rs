use egui::Slider;
use log::info;

use crate::app::AnnotateApp;
use crate::element::Element;
use crate::state::{MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};
use crate::tools::{Tool, ToolKind};

pub fn tools_panel(app: &mut AnnotateApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.editor().active_tool_kind();
            for kind in ToolKind::ALL {
                if ui.selectable_label(active == kind, kind.label()).clicked() {
                    info!("Tool selected from UI: {kind}");
                    app.editor_mut().set_tool(kind);
                }
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = app.editor().color();
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::OnlyBlend,
                )
                .changed()
                {
                    app.editor_mut().set_color(color);
                }
            });

            ui.horizontal(|ui| {
                ui.label("Stroke:");
                let mut width = app.editor().stroke_width();
                if ui
                    .add(Slider::new(&mut width, MIN_STROKE_WIDTH..=MAX_STROKE_WIDTH))
                    .changed()
                {
                    app.editor_mut().set_stroke_width(width);
                }
            });

            ui.horizontal(|ui| {
                ui.label("Font size:");
                let mut font = app.editor().font().clone();
                if ui.add(Slider::new(&mut font.size, 8.0..=96.0)).changed() {
                    app.editor_mut().set_font(font);
                }
            });
            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = !app.editor().history().is_empty();
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.editor_mut().undo();
                }
                let can_delete = app.editor().has_selection();
                if ui.add_enabled(can_delete, egui::Button::new("Delete")).clicked() {
                    app.editor_mut().delete_selected();
                }
                if ui.button("Reset…").clicked() {
                    app.request_reset();
                }
            });
            ui.separator();

            let editor = app.editor();
            ui.label(format!(
                "{} ({})",
                editor.active_tool().name(),
                editor.active_tool().current_state_name()
            ));
            ui.label(format!("Elements: {}", editor.elements().len()));
            ui.label(format!("Undo steps: {}", editor.history().len()));
            if let Some(selected) = editor.selected_element() {
                ui.label(format!("Selected: {}", selected.element_type()));
            }
            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
            ui.label(format!("Ctrl+S saves to {}", app.output().display()));
        });
}
