#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod file_handler;
pub mod input;
pub mod panels;
pub mod state;
pub mod submit;
pub mod texture;

pub use app::SketchApp;
pub use canvas::SketchCanvas;
pub use input::{PointerEvent, PointerTranslator};
pub use state::{AppState, GeneratedImage, Screen, Tool};
pub use submit::{SubmissionError, SubmitConfig};
pub use texture::CanvasTexture;
