//! The results screen: loading indicator or the generated image, with
//! download / new-sketch actions.

use crate::app::SketchApp;
use std::time::Duration;

pub fn results_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.heading(super::APP_TAGLINE);
            ui.add_space(24.0);

            if app.state().is_loading() {
                ui.add_space(120.0);
                ui.add(egui::Spinner::new().size(40.0));
                ui.add_space(12.0);
                ui.label("Generating your image...");
                // Keep repainting so the spinner animates and the pending
                // submission channel gets polled promptly.
                ctx.request_repaint_after(Duration::from_millis(100));
                return;
            }

            if let Some(texture) = app.result_texture() {
                ui.add(
                    egui::Image::from_texture(texture)
                        .max_size(egui::vec2(600.0, 500.0))
                        .maintain_aspect_ratio(true),
                );
            } else {
                ui.label("No image to show.");
            }

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                ui.add_space(ui.available_width() / 2.0 - 110.0);
                if ui.button("Download").clicked() {
                    app.request_download();
                }
                if ui.button("New Sketch").clicked() {
                    app.request_new_sketch();
                }
            });
        });
    });
}
