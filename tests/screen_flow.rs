//! Screen-controller transitions with simulated submission outcomes.

use eframe_sketch::canvas::{BACKGROUND, SketchCanvas};
use eframe_sketch::state::{AppState, GeneratedImage, Screen};
use eframe_sketch::submit::parse_response;
use egui::{Color32, Pos2};

fn generated(reference: &str) -> GeneratedImage {
    GeneratedImage {
        reference: reference.to_owned(),
        png: vec![0x89, b'P', b'N', b'G'],
    }
}

#[test]
fn generate_enters_results_loading_before_any_response() {
    let mut state = AppState::new();
    assert!(state.begin_generate());
    assert_eq!(state.screen(), Screen::Results);
    assert!(state.is_loading());
    assert!(state.generated().is_none());
}

#[test]
fn success_with_url_field_installs_the_reference() {
    let mut state = AppState::new();
    state.begin_generate();

    let reference = parse_response(r#"{"url":"http://x/y.png"}"#).unwrap();
    state.submission_succeeded(generated(&reference));

    assert_eq!(state.screen(), Screen::Results);
    assert!(!state.is_loading());
    assert_eq!(state.generated().unwrap().reference, "http://x/y.png");
}

#[test]
fn success_with_image_field_installs_the_reference() {
    let mut state = AppState::new();
    state.begin_generate();

    let reference = parse_response(r#"{"image":"data:image/png;base64,AAA"}"#).unwrap();
    state.submission_succeeded(generated(&reference));

    assert!(!state.is_loading());
    assert_eq!(
        state.generated().unwrap().reference,
        "data:image/png;base64,AAA"
    );
}

#[test]
fn failure_returns_to_draw_and_notifies_exactly_once() {
    let mut state = AppState::new();
    state.begin_generate();
    state.submission_failed("generation service returned HTTP 500".to_owned());

    assert_eq!(state.screen(), Screen::Draw);
    assert!(!state.is_loading());
    assert!(state.generated().is_none());

    let first = state.take_error();
    assert_eq!(
        first.as_deref(),
        Some("generation service returned HTTP 500")
    );
    assert!(state.take_error().is_none(), "notification fired twice");
}

#[test]
fn failure_clears_a_previous_result() {
    let mut state = AppState::new();
    state.begin_generate();
    state.submission_succeeded(generated("http://x/first.png"));

    state.begin_generate();
    state.submission_failed("network error".to_owned());
    assert!(state.generated().is_none());
}

#[test]
fn new_sketch_clears_result_and_raster() {
    let mut state = AppState::new();
    let mut canvas = SketchCanvas::new();
    canvas.begin_stroke(Pos2::new(100.0, 100.0), Color32::BLACK, 10);
    canvas.extend_stroke(Pos2::new(300.0, 200.0), Color32::BLACK, 10);
    canvas.end_stroke();

    state.begin_generate();
    state.submission_succeeded(generated("http://x/y.png"));

    // What the app does on the New Sketch action.
    state.new_sketch();
    canvas.clear();

    assert_eq!(state.screen(), Screen::Draw);
    assert!(state.generated().is_none());
    assert!(canvas.image().pixels.iter().all(|&p| p == BACKGROUND));
}

#[test]
fn download_without_an_image_is_a_no_op() {
    let mut app = eframe_sketch::SketchApp::with_config(eframe_sketch::SubmitConfig {
        endpoint: "http://127.0.0.1:1/unused".to_owned(),
    });
    // Must return without opening a dialog.
    app.request_download();
    assert!(app.state().generated().is_none());
}

#[test]
fn generate_while_loading_changes_nothing() {
    let mut state = AppState::new();
    assert!(state.begin_generate());
    assert!(!state.begin_generate());
    assert!(!state.begin_generate());
    assert_eq!(state.screen(), Screen::Results);
    assert!(state.is_loading());
}
