#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use greenthreads_api::config::{ComfyUIConfig, GeminiConfig, ServerConfig};
use greenthreads_api::router::build_app_router;
use greenthreads_api::state::{AppState, Generators};
use greenthreads_core::generation::{
    Classification, FabricClassifier, GenerationError, ImageGenerator, ImageParams,
    ProgressObserver, TextGenerator,
};
use greenthreads_gemini::RetryPolicy;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Fake adapters
// ---------------------------------------------------------------------------

pub struct FakeImages {
    pub fail: bool,
    /// Time spent "rendering" before answering.
    pub delay: Duration,
}

#[async_trait]
impl ImageGenerator for FakeImages {
    async fn generate(
        &self,
        _prompt: &str,
        _params: &ImageParams,
        _observer: &dyn ProgressObserver,
    ) -> Result<Vec<u8>, GenerationError> {
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(GenerationError::Unavailable("offline".into()));
        }
        Ok(png_bytes())
    }
}

/// Answers every prompt with `reply`, or fails every call when `None`.
pub struct FakeText {
    pub reply: Option<String>,
}

#[async_trait]
impl TextGenerator for FakeText {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.reply
            .clone()
            .ok_or_else(|| GenerationError::Unavailable("retries exhausted".into()))
    }
}

pub struct FakeClassifier;

#[async_trait]
impl FabricClassifier for FakeClassifier {
    async fn classify(&self, _image: &[u8], _mime_type: &str) -> Result<Vec<Classification>, GenerationError> {
        Ok(vec![Classification {
            label: "denim".into(),
            probability: 0.9,
        }])
    }
}

/// How the fakes behave for one test app.
pub struct Behaviour {
    pub image_fails: bool,
    pub image_delay: Duration,
    pub text_reply: Option<&'static str>,
    pub qr_codes_enabled: bool,
    pub request_timeout_secs: u64,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            image_fails: false,
            image_delay: Duration::ZERO,
            text_reply: Some("Sustainability Score: 82\nExplanation:\nGood choices."),
            qr_codes_enabled: false,
            request_timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 3000,
        cors_origins: vec!["http://localhost:8501".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        gemini: GeminiConfig {
            api_key: "test-key".to_string(),
            model: "test-model".to_string(),
            fabric_model: "test-fabric-model".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
        },
        retry: RetryPolicy::none(),
        comfyui: ComfyUIConfig {
            url: "http://127.0.0.1:9".to_string(),
            checkpoint: "test.safetensors".to_string(),
        },
        qr_codes_enabled: false,
        public_domain: Some("greenthreads.example".to_string()),
        default_user_id: "default_user".to_string(),
    }
}

/// Full application router over fake adapters, with the production
/// middleware stack.
pub fn build_test_app_with(pool: SqlitePool, behaviour: Behaviour) -> Router {
    let mut config = test_config();
    config.qr_codes_enabled = behaviour.qr_codes_enabled;
    config.request_timeout_secs = behaviour.request_timeout_secs;

    let text: Arc<FakeText> = Arc::new(FakeText {
        reply: behaviour.text_reply.map(str::to_string),
    });
    let generators = Generators {
        images: Arc::new(FakeImages {
            fail: behaviour.image_fails,
            delay: behaviour.image_delay,
        }),
        text: text.clone(),
        fabric_text: text,
        classifier: Arc::new(FakeClassifier),
    };

    build_app_router(AppState::new(pool, config, generators))
}

pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with(pool, Behaviour::default())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn png_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbImage::new(2, 2)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

pub fn design_form() -> serde_json::Value {
    serde_json::json!({
        "style": "Casual",
        "materials": ["Hemp"],
        "clothing_type": "Shirt",
        "production_method": "Cut-and-Sew",
        "packaging": "Minimal Packaging",
        "production_location": "Domestic",
        "shipping_method": "Ground Shipping",
        "base_color": "Green"
    })
}
