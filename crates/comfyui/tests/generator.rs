use std::io::Cursor;
use std::sync::Mutex;

use assert_matches::assert_matches;
use futures::stream;
use greenthreads_comfyui::generator::{ensure_png, wait_for_completion};
use greenthreads_core::generation::{GenerationError, ProgressError, ProgressObserver};
use tokio_tungstenite::tungstenite::{self, Message};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingObserver {
    seen: Mutex<Vec<u8>>,
    fail: bool,
}

impl ProgressObserver for RecordingObserver {
    fn on_progress(&self, percent: u8) -> Result<(), ProgressError> {
        self.seen.lock().unwrap().push(percent);
        if self.fail {
            Err(ProgressError("display gone".into()))
        } else {
            Ok(())
        }
    }
}

fn text(json: &str) -> Result<Message, tungstenite::Error> {
    Ok(Message::Text(json.to_string()))
}

// ---------------------------------------------------------------------------
// wait_for_completion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn relays_progress_until_prompt_finishes() {
    let mut frames = stream::iter(vec![
        text(r#"{"type":"status","data":{"status":{"exec_info":{"queue_remaining":1}}}}"#),
        text(r#"{"type":"execution_start","data":{"prompt_id":"p1"}}"#),
        text(r#"{"type":"progress","data":{"value":5,"max":20,"prompt_id":"p1"}}"#),
        Ok(Message::Binary(vec![0, 1, 2])),
        text(r#"{"type":"progress","data":{"value":3,"max":20,"prompt_id":"other"}}"#),
        text(r#"{"type":"progress","data":{"value":20,"max":20,"prompt_id":"p1"}}"#),
        text(r#"{"type":"executing","data":{"node":null,"prompt_id":"p1"}}"#),
        text(r#"{"type":"progress","data":{"value":1,"max":2,"prompt_id":"p1"}}"#),
    ]);
    let observer = RecordingObserver::default();

    wait_for_completion(&mut frames, "p1", &observer).await.unwrap();

    assert_eq!(*observer.seen.lock().unwrap(), vec![25, 100]);
}

#[tokio::test]
async fn failing_observer_does_not_fail_generation() {
    let mut frames = stream::iter(vec![
        text(r#"{"type":"progress","data":{"value":10,"max":20}}"#),
        text(r#"{"type":"executing","data":{"node":null,"prompt_id":"p1"}}"#),
    ]);
    let observer = RecordingObserver {
        fail: true,
        ..Default::default()
    };

    assert!(wait_for_completion(&mut frames, "p1", &observer).await.is_ok());
    assert_eq!(*observer.seen.lock().unwrap(), vec![50]);
}

#[tokio::test]
async fn execution_error_fails() {
    let mut frames = stream::iter(vec![text(
        r#"{"type":"execution_error","data":{"prompt_id":"p1","node_id":"3","exception_message":"out of memory","exception_type":"RuntimeError"}}"#,
    )]);
    let result = wait_for_completion(&mut frames, "p1", &RecordingObserver::default()).await;
    assert_matches!(result, Err(GenerationError::Failed(msg)) if msg.contains("out of memory"));
}

#[tokio::test]
async fn closed_socket_is_unavailable() {
    let mut frames = stream::iter(vec![
        text(r#"{"type":"execution_start","data":{"prompt_id":"p1"}}"#),
        Ok(Message::Close(None)),
    ]);
    let result = wait_for_completion(&mut frames, "p1", &RecordingObserver::default()).await;
    assert_matches!(result, Err(GenerationError::Unavailable(_)));
}

// ---------------------------------------------------------------------------
// ensure_png
// ---------------------------------------------------------------------------

#[test]
fn jpeg_output_is_reencoded_as_png() {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(4, 4));
    let mut jpeg = Cursor::new(Vec::new());
    img.write_to(&mut jpeg, image::ImageFormat::Jpeg).unwrap();

    let png = ensure_png(jpeg.into_inner()).unwrap();
    assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
    assert_eq!(image::load_from_memory(&png).unwrap().width(), 4);
}

#[test]
fn png_passes_through_untouched() {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(2, 2));
    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, image::ImageFormat::Png).unwrap();
    let bytes = png.into_inner();

    assert_eq!(ensure_png(bytes.clone()).unwrap(), bytes);
}

#[test]
fn garbage_output_fails() {
    assert_matches!(ensure_png(vec![1, 2, 3]), Err(GenerationError::Failed(_)));
}
