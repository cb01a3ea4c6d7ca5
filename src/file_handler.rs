//! Saving the generated image to disk.
//!
//! Download is a no-op when no image is present. On native we open a save
//! dialog seeded with a fixed default filename and write the PNG bytes to
//! wherever the user picks.

use crate::state::GeneratedImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default filename offered in the save dialog.
pub const DOWNLOAD_FILENAME: &str = "generated-image.png";

/// Errors that can occur while saving the generated image.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Write the image bytes to `path`.
pub fn write_image(image: &GeneratedImage, path: &Path) -> Result<(), SaveError> {
    std::fs::write(path, &image.png).map_err(|source| SaveError::Write {
        path: path.display().to_string(),
        source,
    })?;
    log::info!(
        "saved generated image ({} bytes) to {}",
        image.png.len(),
        path.display()
    );
    Ok(())
}

/// Ask the user where to save and write the image there.
///
/// Returns the chosen path, or `None` when the dialog was cancelled.
pub fn save_with_dialog(image: &GeneratedImage) -> Result<Option<PathBuf>, SaveError> {
    let Some(path) = rfd::FileDialog::new()
        .set_file_name(DOWNLOAD_FILENAME)
        .add_filter("PNG image", &["png"])
        .save_file()
    else {
        log::info!("save dialog cancelled");
        return Ok(None);
    };
    write_image(image, &path)?;
    Ok(Some(path))
}
