//! Submission adapter: ships the exported raster to the generation service
//! and resolves the response into displayable image bytes.
//!
//! The blocking client runs on a spawned worker thread; the outcome comes
//! back over an mpsc channel that the app polls each frame. One submission
//! per generate action, no retry, no cancellation.

use crate::state::GeneratedImage;
use base64::Engine as _;
use serde::Deserialize;
use std::sync::mpsc;
use thiserror::Error;

/// Multipart field name the service expects.
pub const FIELD_NAME: &str = "data";
/// Filename attached to the uploaded sketch.
pub const UPLOAD_FILENAME: &str = "sketch.png";

/// Default generation endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://blythe-unfallowed-felicia.ngrok-free.dev/webhook-test/8011cfe3-1569-4254-a3e2-4932fb06ca29";

/// Where and how to submit a sketch.
#[derive(Debug, Clone)]
pub struct SubmitConfig {
    pub endpoint: String,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
        }
    }
}

/// Everything that can go wrong between clicking Generate and getting an
/// image back. All variants are caught at the submission boundary and
/// surfaced as a user notification, never a crash.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("generation service returned HTTP {status}")]
    Http { status: u16 },
    #[error("failed to reach the generation service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("response body was not valid JSON: {0}")]
    BadResponse(#[from] serde_json::Error),
    #[error("response contained neither an `image` nor a `url` field")]
    MissingResultField,
    #[error("could not decode the returned image: {0}")]
    BadImage(String),
}

/// Success-response body. Either field may be absent or empty.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl GenerateResponse {
    /// First non-empty of `image` then `url`.
    fn into_reference(self) -> Option<String> {
        [self.image, self.url]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }
}

/// Parse a 2xx response body into an image reference.
///
/// A field-less body is a service bug, reported as
/// [`SubmissionError::MissingResultField`] rather than handed to the viewer.
pub fn parse_response(body: &str) -> Result<String, SubmissionError> {
    let parsed: GenerateResponse = serde_json::from_str(body)?;
    parsed
        .into_reference()
        .ok_or(SubmissionError::MissingResultField)
}

/// Resolve an image reference to raw PNG bytes: `data:` URIs decode locally,
/// anything else is fetched with a GET.
pub fn resolve_reference(
    client: &reqwest::blocking::Client,
    reference: &str,
) -> Result<Vec<u8>, SubmissionError> {
    let bytes = if let Some(data) = reference.strip_prefix("data:") {
        let encoded = data
            .split_once(";base64,")
            .map(|(_, rest)| rest)
            .ok_or_else(|| SubmissionError::BadImage("unsupported data URI".to_owned()))?;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|err| SubmissionError::BadImage(err.to_string()))?
    } else {
        let response = client.get(reference).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Http {
                status: status.as_u16(),
            });
        }
        response.bytes()?.to_vec()
    };
    ensure_png(bytes)
}

/// Validate the bytes decode as an image, re-encoding to PNG if the service
/// handed back some other format.
fn ensure_png(bytes: Vec<u8>) -> Result<Vec<u8>, SubmissionError> {
    match image::guess_format(&bytes) {
        Ok(image::ImageFormat::Png) => Ok(bytes),
        Ok(other) => {
            log::info!("re-encoding {other:?} result as PNG");
            let decoded = image::load_from_memory(&bytes)
                .map_err(|err| SubmissionError::BadImage(err.to_string()))?;
            let mut out = std::io::Cursor::new(Vec::new());
            decoded
                .write_to(&mut out, image::ImageFormat::Png)
                .map_err(|err| SubmissionError::BadImage(err.to_string()))?;
            Ok(out.into_inner())
        }
        Err(err) => Err(SubmissionError::BadImage(err.to_string())),
    }
}

/// Submit one exported sketch, blocking until the outcome is known.
///
/// One multipart part: field [`FIELD_NAME`], filename [`UPLOAD_FILENAME`],
/// PNG bytes. No custom headers; the transport sets the boundary.
pub fn submit(png: Vec<u8>, config: &SubmitConfig) -> Result<GeneratedImage, SubmissionError> {
    let client = reqwest::blocking::Client::new();

    let part = reqwest::blocking::multipart::Part::bytes(png)
        .file_name(UPLOAD_FILENAME)
        .mime_str("image/png")?;
    let form = reqwest::blocking::multipart::Form::new().part(FIELD_NAME, part);

    log::info!("submitting sketch to {}", config.endpoint);
    let response = client.post(&config.endpoint).multipart(form).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(SubmissionError::Http {
            status: status.as_u16(),
        });
    }

    let reference = parse_response(&response.text()?)?;
    let png = resolve_reference(&client, &reference)?;
    Ok(GeneratedImage { reference, png })
}

/// The result delivered back to the UI thread.
pub type SubmissionOutcome = Result<GeneratedImage, SubmissionError>;

/// Run [`submit`] on a worker thread; the receiver yields exactly one
/// outcome. Dropping the receiver abandons the result, not the request.
pub fn spawn_submission(png: Vec<u8>, config: SubmitConfig) -> mpsc::Receiver<SubmissionOutcome> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let outcome = submit(png, &config);
        if tx.send(outcome).is_err() {
            log::warn!("submission finished after the app stopped listening");
        }
    });
    rx
}
