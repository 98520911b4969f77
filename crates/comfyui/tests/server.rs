//! `ComfyUIImageGenerator` against a local stand-in ComfyUI server.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use greenthreads_comfyui::ComfyUIImageGenerator;
use greenthreads_core::generation::{
    GenerationError, ImageGenerator, ImageParams, NoProgress, ProgressError, ProgressObserver,
};
use serde_json::{json, Value};
use tokio::sync::Notify;

const PROMPT_ID: &str = "p-1";
const CHECKPOINT: &str = "test.safetensors";

// ---------------------------------------------------------------------------
// Stand-in server
// ---------------------------------------------------------------------------

struct StandIn {
    prompt_status: StatusCode,
    history: Value,
    image: Vec<u8>,
    /// Signalled once a prompt is queued; the socket then streams progress.
    queued: Notify,
    last_prompt: Mutex<Option<Value>>,
    last_view: Mutex<Option<HashMap<String, String>>>,
}

impl StandIn {
    fn new(history: Value, image: Vec<u8>) -> Self {
        Self {
            prompt_status: StatusCode::OK,
            history,
            image,
            queued: Notify::new(),
            last_prompt: Mutex::new(None),
            last_view: Mutex::new(None),
        }
    }
}

async fn queue_prompt(
    State(server): State<Arc<StandIn>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    *server.last_prompt.lock().unwrap() = Some(body);
    if server.prompt_status != StatusCode::OK {
        return (server.prompt_status, Json(json!({"error": "invalid prompt"})));
    }
    server.queued.notify_one();
    (StatusCode::OK, Json(json!({"prompt_id": PROMPT_ID, "number": 3})))
}

async fn history(State(server): State<Arc<StandIn>>, Path(prompt_id): Path<String>) -> Json<Value> {
    assert_eq!(prompt_id, PROMPT_ID);
    Json(server.history.clone())
}

async fn view(
    State(server): State<Arc<StandIn>>,
    Query(query): Query<HashMap<String, String>>,
) -> Vec<u8> {
    *server.last_view.lock().unwrap() = Some(query);
    server.image.clone()
}

async fn socket(ws: WebSocketUpgrade, State(server): State<Arc<StandIn>>) -> Response {
    ws.on_upgrade(move |socket| stream_progress(socket, server))
}

async fn stream_progress(mut socket: WebSocket, server: Arc<StandIn>) {
    server.queued.notified().await;
    let frames = [
        json!({"type": "execution_start", "data": {"prompt_id": PROMPT_ID}}),
        json!({"type": "progress", "data": {"value": 10, "max": 20, "prompt_id": PROMPT_ID}}),
        json!({"type": "progress", "data": {"value": 20, "max": 20, "prompt_id": PROMPT_ID}}),
        json!({"type": "executing", "data": {"node": null, "prompt_id": PROMPT_ID}}),
    ];
    for frame in frames {
        if socket.send(Message::Text(frame.to_string().into())).await.is_err() {
            return;
        }
    }
}

async fn serve(server: StandIn) -> (String, Arc<StandIn>) {
    let server = Arc::new(server);
    let app = Router::new()
        .route("/ws", get(socket))
        .route("/prompt", post(queue_prompt))
        .route("/history/{prompt_id}", get(history))
        .route("/view", get(view))
        .with_state(server.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), server)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingObserver {
    seen: Mutex<Vec<u8>>,
}

impl ProgressObserver for RecordingObserver {
    fn on_progress(&self, percent: u8) -> Result<(), ProgressError> {
        self.seen.lock().unwrap().push(percent);
        Ok(())
    }
}

fn history_with_output(filename: &str) -> Value {
    json!({
        PROMPT_ID: {
            "outputs": {
                "9": {"images": [{"filename": filename, "subfolder": "designs", "type": "output"}]}
            }
        }
    })
}

fn jpeg_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbImage::new(4, 4)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
        .unwrap();
    bytes
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generates_png_from_first_history_output() {
    let (url, server) = serve(StandIn::new(history_with_output("design_00001_.jpg"), jpeg_bytes())).await;
    let generator = ComfyUIImageGenerator::new(&url, CHECKPOINT);
    let observer = RecordingObserver::default();

    let png = generator
        .generate("a green hemp shirt", &ImageParams::default(), &observer)
        .await
        .unwrap();

    let decoded = image::load_from_memory_with_format(&png, image::ImageFormat::Png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (4, 4));
    assert_eq!(*observer.seen.lock().unwrap(), vec![50, 100]);

    let prompt = server.last_prompt.lock().unwrap().clone().unwrap();
    assert!(!prompt["client_id"].as_str().unwrap().is_empty());
    assert_eq!(prompt["prompt"]["4"]["inputs"]["ckpt_name"], CHECKPOINT);

    let view = server.last_view.lock().unwrap().clone().unwrap();
    assert_eq!(view["filename"], "design_00001_.jpg");
    assert_eq!(view["subfolder"], "designs");
    assert_eq!(view["type"], "output");
}

#[tokio::test]
async fn history_without_images_is_empty_output() {
    let history = json!({PROMPT_ID: {"outputs": {}}});
    let (url, server) = serve(StandIn::new(history, jpeg_bytes())).await;
    let generator = ComfyUIImageGenerator::new(&url, CHECKPOINT);

    let result = generator
        .generate("a green hemp shirt", &ImageParams::default(), &NoProgress)
        .await;

    assert_matches!(result, Err(GenerationError::EmptyOutput));
    assert!(server.last_view.lock().unwrap().is_none());
}

#[tokio::test]
async fn empty_download_is_empty_output() {
    let (url, _server) = serve(StandIn::new(history_with_output("blank.png"), Vec::new())).await;
    let generator = ComfyUIImageGenerator::new(&url, CHECKPOINT);

    let result = generator
        .generate("a green hemp shirt", &ImageParams::default(), &NoProgress)
        .await;

    assert_matches!(result, Err(GenerationError::EmptyOutput));
}

#[tokio::test]
async fn rejected_prompt_fails_without_retry() {
    let mut stand_in = StandIn::new(history_with_output("unused.png"), jpeg_bytes());
    stand_in.prompt_status = StatusCode::BAD_REQUEST;
    let (url, _server) = serve(stand_in).await;
    let generator = ComfyUIImageGenerator::new(&url, CHECKPOINT);

    let result = generator
        .generate("a green hemp shirt", &ImageParams::default(), &NoProgress)
        .await;

    assert_matches!(result, Err(GenerationError::Failed(msg)) if msg.contains("400"));
}

#[tokio::test]
async fn unreachable_server_is_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let generator = ComfyUIImageGenerator::new(&format!("http://{addr}"), CHECKPOINT);

    let result = generator
        .generate("a green hemp shirt", &ImageParams::default(), &NoProgress)
        .await;

    assert_matches!(result, Err(GenerationError::Unavailable(_)));
}
