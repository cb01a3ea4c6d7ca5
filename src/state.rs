//! Application state and the screen transition machine.
//!
//! All mutable UI state lives in one [`AppState`] owned by the app. Views
//! read it; mutation goes through the named transition methods below so the
//! screen/loading/result invariants hold in one place.

use crate::canvas::BACKGROUND;
use egui::Color32;

/// Ink color used by the pen tool.
pub const INK: Color32 = Color32::BLACK;

/// Inclusive brush size range, in pixels.
pub const BRUSH_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=20;

/// Drawing mode: ink-applying or background-restoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
}

impl Tool {
    /// Color this tool paints with.
    pub fn color(self) -> Color32 {
        match self {
            Tool::Pen => INK,
            Tool::Eraser => BACKGROUND,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Pen => "Pen",
            Tool::Eraser => "Eraser",
        }
    }
}

/// Which view is active. Exactly one at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Draw,
    Results,
}

/// A successfully generated image: the reference the service returned plus
/// the resolved PNG bytes, so display and download never re-fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub reference: String,
    pub png: Vec<u8>,
}

/// The single source of truth for the UI.
#[derive(Debug)]
pub struct AppState {
    screen: Screen,
    tool: Tool,
    brush_size: u32,
    loading: bool,
    generated: Option<GeneratedImage>,
    /// Pending failure message, shown once as a blocking modal.
    last_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Draw,
            tool: Tool::Pen,
            brush_size: 3,
            loading: false,
            generated: None,
            last_error: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn generated(&self) -> Option<&GeneratedImage> {
        self.generated.as_ref()
    }

    /// Tool changes never affect the active screen.
    pub fn set_tool(&mut self, tool: Tool) {
        log::info!("tool selected: {}", tool.name());
        self.tool = tool;
    }

    /// Brush size is clamped into [`BRUSH_SIZE_RANGE`] at every mutation.
    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = size.clamp(*BRUSH_SIZE_RANGE.start(), *BRUSH_SIZE_RANGE.end());
    }

    /// `Draw --generate--> Results`, loading set before any response exists.
    ///
    /// Returns `false` (and changes nothing) when a submission is already in
    /// flight, so a double click never issues a duplicate request.
    pub fn begin_generate(&mut self) -> bool {
        if self.loading {
            log::warn!("generate ignored: a submission is already in flight");
            return false;
        }
        self.loading = true;
        self.screen = Screen::Results;
        true
    }

    /// `Results --submission success--> Results` with the result installed.
    pub fn submission_succeeded(&mut self, image: GeneratedImage) {
        log::info!("submission succeeded: {}", image.reference);
        self.loading = false;
        self.generated = Some(image);
    }

    /// `Results --submission failure--> Draw`; the message is surfaced to
    /// the user exactly once via [`take_error`](Self::take_error).
    pub fn submission_failed(&mut self, message: String) {
        log::error!("submission failed: {message}");
        self.loading = false;
        self.generated = None;
        self.screen = Screen::Draw;
        self.last_error = Some(message);
    }

    /// `Results --new sketch--> Draw`. The caller clears the raster.
    pub fn new_sketch(&mut self) {
        self.generated = None;
        self.loading = false;
        self.screen = Screen::Draw;
    }

    /// Takes the pending failure message, if any. Subsequent calls return
    /// `None` until the next failure.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }
}
