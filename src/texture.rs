//! Uploads the canvas raster to a GPU texture, re-uploading only when the
//! raster version changed since the last frame.

use crate::canvas::SketchCanvas;
use egui::{Context, TextureHandle, TextureOptions};

/// A versioned texture slot for the drawing raster.
#[derive(Default)]
pub struct CanvasTexture {
    handle: Option<TextureHandle>,
    uploaded_version: Option<u64>,
}

impl CanvasTexture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the texture for the current raster contents, uploading if stale.
    pub fn get_or_upload(&mut self, ctx: &Context, canvas: &SketchCanvas) -> &TextureHandle {
        let version = canvas.version();
        let stale = self.uploaded_version != Some(version) || self.handle.is_none();
        if stale {
            match &mut self.handle {
                Some(handle) => handle.set(canvas.image().clone(), TextureOptions::NEAREST),
                None => {
                    self.handle = Some(ctx.load_texture(
                        "sketch_canvas",
                        canvas.image().clone(),
                        TextureOptions::NEAREST,
                    ));
                }
            }
            self.uploaded_version = Some(version);
        }
        self.handle.as_ref().expect("texture uploaded above")
    }

    /// Drop the cached handle, forcing a fresh upload next frame.
    pub fn invalidate(&mut self) {
        self.handle = None;
        self.uploaded_version = None;
    }

    #[cfg(test)]
    fn uploaded_version(&self) -> Option<u64> {
        self.uploaded_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    #[test]
    fn upload_tracks_canvas_version() {
        let ctx = Context::default();
        let mut canvas = SketchCanvas::new();
        let mut texture = CanvasTexture::new();

        let id_blank = texture.get_or_upload(&ctx, &canvas).id();
        assert_eq!(texture.uploaded_version(), Some(canvas.version()));

        canvas.begin_stroke(Pos2::new(10.0, 10.0), egui::Color32::BLACK, 3);
        canvas.end_stroke();
        let id_drawn = texture.get_or_upload(&ctx, &canvas).id();
        assert_eq!(texture.uploaded_version(), Some(canvas.version()));

        // Same handle is reused across uploads.
        assert_eq!(id_blank, id_drawn);
    }

    #[test]
    fn invalidate_forces_reupload() {
        let ctx = Context::default();
        let canvas = SketchCanvas::new();
        let mut texture = CanvasTexture::new();

        texture.get_or_upload(&ctx, &canvas);
        texture.invalidate();
        assert_eq!(texture.uploaded_version(), None);
        texture.get_or_upload(&ctx, &canvas);
        assert_eq!(texture.uploaded_version(), Some(canvas.version()));
    }
}
