//! The drawing screen: canvas surface plus the tool bar.

use crate::app::SketchApp;
use crate::canvas::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::state::{BRUSH_SIZE_RANGE, Tool};
use egui::{Color32, Pos2, Rect, Sense, vec2};

pub fn draw_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(super::APP_TAGLINE);
        });
        ui.add_space(8.0);

        // Canvas surface at its native pixel size.
        let (response, painter) = ui.allocate_painter(
            vec2(CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32),
            Sense::click_and_drag(),
        );
        let canvas_rect = response.rect;
        app.handle_canvas_input(ctx, canvas_rect);

        let texture_id = app.canvas_texture_id(ctx);
        painter.image(
            texture_id,
            canvas_rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
        painter.rect_stroke(canvas_rect, 2.0, egui::Stroke::new(1.0, Color32::GRAY));

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            for tool in [Tool::Pen, Tool::Eraser] {
                let selected = app.state().tool() == tool;
                if ui.selectable_label(selected, tool.name()).clicked() {
                    app.state_mut().set_tool(tool);
                }
            }

            if ui.button("Clear").clicked() {
                app.clear_canvas();
            }

            ui.separator();

            ui.label("Size:");
            let mut size = app.state().brush_size();
            if ui
                .add(egui::Slider::new(&mut size, BRUSH_SIZE_RANGE))
                .changed()
            {
                app.state_mut().set_brush_size(size);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Generate Image").clicked() {
                    app.generate();
                }
            });
        });
    });
}
