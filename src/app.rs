//! The eframe application: owns all state and sequences the two screens.

use crate::canvas::SketchCanvas;
use crate::file_handler;
use crate::input::{self, PointerTranslator};
use crate::panels;
use crate::state::{AppState, GeneratedImage, Screen};
use crate::submit::{SubmissionOutcome, SubmitConfig, spawn_submission};
use crate::texture::CanvasTexture;
use egui::{ColorImage, Rect, TextureHandle, TextureOptions};
use std::sync::mpsc;

pub struct SketchApp {
    state: AppState,
    canvas: SketchCanvas,
    canvas_texture: CanvasTexture,
    translator: PointerTranslator,
    config: SubmitConfig,
    /// Receiver for the single in-flight submission, if any.
    pending: Option<mpsc::Receiver<SubmissionOutcome>>,
    /// Decoded result, uploaded once per successful submission.
    result_texture: Option<TextureHandle>,
    /// Failure message currently shown as a blocking modal.
    error_modal: Option<String>,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_config(SubmitConfig::default())
    }

    pub fn with_config(config: SubmitConfig) -> Self {
        Self {
            state: AppState::new(),
            canvas: SketchCanvas::new(),
            canvas_texture: CanvasTexture::new(),
            translator: PointerTranslator::new(Rect::ZERO),
            config,
            pending: None,
            result_texture: None,
            error_modal: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn canvas(&self) -> &SketchCanvas {
        &self.canvas
    }

    pub fn result_texture(&self) -> Option<&TextureHandle> {
        self.result_texture.as_ref()
    }

    /// Translate this frame's pointer input over `canvas_rect` into stroke
    /// operations on the raster.
    pub fn handle_canvas_input(&mut self, ctx: &egui::Context, canvas_rect: Rect) {
        self.translator.set_canvas_rect(canvas_rect);
        for event in self.translator.gather(ctx) {
            input::apply_pointer_event(event, &self.state, &mut self.canvas);
        }
    }

    /// Texture id for the current raster contents.
    pub fn canvas_texture_id(&mut self, ctx: &egui::Context) -> egui::TextureId {
        self.canvas_texture.get_or_upload(ctx, &self.canvas).id()
    }

    pub fn clear_canvas(&mut self) {
        self.canvas.clear();
    }

    /// Export the raster and launch the submission. Ignored while a
    /// submission is already in flight.
    pub fn generate(&mut self) {
        if !self.state.begin_generate() {
            return;
        }
        match self.canvas.export_png() {
            Ok(png) => {
                self.pending = Some(spawn_submission(png, self.config.clone()));
            }
            Err(err) => self.state.submission_failed(err.to_string()),
        }
    }

    /// Save the generated image via the platform dialog; no-op without one.
    pub fn request_download(&mut self) {
        let Some(image) = self.state.generated() else {
            return;
        };
        if let Err(err) = file_handler::save_with_dialog(image) {
            log::error!("download failed: {err}");
            self.error_modal = Some(err.to_string());
        }
    }

    pub fn request_new_sketch(&mut self) {
        self.state.new_sketch();
        self.canvas.clear();
        self.result_texture = None;
    }

    /// Poll the in-flight submission, applying its outcome when it lands.
    fn poll_submission(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => {
                self.pending = None;
                self.apply_outcome(ctx, outcome);
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.pending = None;
                self.state
                    .submission_failed("submission worker exited unexpectedly".to_owned());
            }
        }
    }

    fn apply_outcome(&mut self, ctx: &egui::Context, outcome: SubmissionOutcome) {
        match outcome {
            Ok(image) => match decode_result(&image) {
                Ok(color_image) => {
                    self.result_texture = Some(ctx.load_texture(
                        "generated_image",
                        color_image,
                        TextureOptions::LINEAR,
                    ));
                    self.state.submission_succeeded(image);
                }
                Err(message) => self.state.submission_failed(message),
            },
            Err(err) => self.state.submission_failed(err.to_string()),
        }
    }
}

/// Decode the resolved PNG bytes for texture upload.
fn decode_result(image: &GeneratedImage) -> Result<ColorImage, String> {
    let decoded = image::load_from_memory(&image.png)
        .map_err(|err| format!("could not decode generated image: {err}"))?
        .to_rgba8();
    let size = [decoded.width() as usize, decoded.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, decoded.as_raw()))
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_submission(ctx);

        if self.error_modal.is_none() {
            self.error_modal = self.state.take_error();
        }

        match self.state.screen() {
            Screen::Draw => panels::draw_panel(self, ctx),
            Screen::Results => panels::results_panel(self, ctx),
        }

        if let Some(message) = self.error_modal.clone() {
            egui::Window::new("Generation failed")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.label("Please try again.");
                    if ui.button("OK").clicked() {
                        self.error_modal = None;
                    }
                });
        }
    }
}
