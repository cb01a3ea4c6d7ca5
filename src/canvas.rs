//! The sketch surface: a fixed-size CPU raster with freehand stroke capture.
//!
//! Strokes are rasterized immediately on pointer input by stamping filled
//! discs along a Bresenham walk between successive pointer positions, which
//! gives rounded caps and joins for free. The raster is exclusively owned
//! here; everything else reads it through [`SketchCanvas::image`].

use egui::{Color32, ColorImage, Pos2};
use image::ImageEncoder;
use thiserror::Error;

/// Raster width in pixels.
pub const CANVAS_WIDTH: usize = 600;
/// Raster height in pixels.
pub const CANVAS_HEIGHT: usize = 500;
/// Uniform background fill; also the eraser color.
pub const BACKGROUND: Color32 = Color32::WHITE;

/// Errors that can occur while encoding the raster.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to encode canvas as PNG: {0}")]
    Encode(#[from] image::ImageError),
}

/// A fixed 600x500 drawing raster with the current stroke state.
pub struct SketchCanvas {
    image: ColorImage,
    last_point: Option<Pos2>,
    is_drawing: bool,
    /// Bumped on every raster mutation so the texture layer only re-uploads
    /// when something actually changed.
    version: u64,
}

impl Default for SketchCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl SketchCanvas {
    /// Create a blank canvas filled with [`BACKGROUND`].
    pub fn new() -> Self {
        Self {
            image: ColorImage::new([CANVAS_WIDTH, CANVAS_HEIGHT], BACKGROUND),
            last_point: None,
            is_drawing: false,
            version: 0,
        }
    }

    pub fn size(&self) -> [usize; 2] {
        self.image.size
    }

    pub fn image(&self) -> &ColorImage {
        &self.image
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// True between a pointer press and the matching release/leave.
    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    /// Start a new path at `pos`, stamping the first dab.
    pub fn begin_stroke(&mut self, pos: Pos2, color: Color32, brush_size: u32) {
        self.is_drawing = true;
        self.last_point = Some(pos);
        self.stamp(pos, color, brush_size);
        self.version += 1;
    }

    /// Draw a segment from the last point to `pos` with the given color and
    /// brush width. Does nothing unless a stroke is in progress.
    pub fn extend_stroke(&mut self, pos: Pos2, color: Color32, brush_size: u32) {
        if !self.is_drawing {
            return;
        }
        let from = self.last_point.unwrap_or(pos);
        self.stamp_line(from, pos, color, brush_size);
        self.last_point = Some(pos);
        self.version += 1;
    }

    /// Close the current path.
    pub fn end_stroke(&mut self) {
        self.is_drawing = false;
        self.last_point = None;
    }

    /// Reset the entire raster to the uniform background fill. Idempotent.
    pub fn clear(&mut self) {
        self.image.pixels.fill(BACKGROUND);
        self.version += 1;
    }

    /// Encode the raster as a lossless PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut rgba = Vec::with_capacity(self.image.pixels.len() * 4);
        for pixel in &self.image.pixels {
            rgba.extend_from_slice(&pixel.to_array());
        }
        let mut out = Vec::new();
        image::codecs::png::PngEncoder::new(&mut out).write_image(
            &rgba,
            CANVAS_WIDTH as u32,
            CANVAS_HEIGHT as u32,
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(out)
    }

    /// Set a single pixel, clipping anything outside the raster.
    fn put_pixel(&mut self, x: i32, y: i32, color: Color32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= CANVAS_WIDTH || y >= CANVAS_HEIGHT {
            return;
        }
        self.image.pixels[y * CANVAS_WIDTH + x] = color;
    }

    /// Stamp a filled disc centered on `pos`.
    ///
    /// The disc radius is `brush_size / 2` (integer), so the painted width is
    /// `2 * (brush_size / 2) + 1` pixels: exact for odd sizes, one pixel
    /// wider for even sizes.
    fn stamp(&mut self, pos: Pos2, color: Color32, brush_size: u32) {
        let r = (brush_size / 2) as i32;
        let (cx, cy) = (pos.x.round() as i32, pos.y.round() as i32);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.put_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Stamp dabs along a Bresenham walk from `from` to `to`.
    fn stamp_line(&mut self, from: Pos2, to: Pos2, color: Color32, brush_size: u32) {
        let (mut x0, mut y0) = (from.x.round() as i32, from.y.round() as i32);
        let (x1, y1) = (to.x.round() as i32, to.y.round() as i32);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.stamp(Pos2::new(x0 as f32, y0 as f32), color, brush_size);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}
