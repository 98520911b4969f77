//! Seams for the generative services.
//!
//! The image, text and classification backends live in their own crates
//! and implement these traits; orchestration code only sees the traits.

use async_trait::async_trait;
use serde::Serialize;

/// Failure of a generative backend after its own retries are exhausted.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// The backend could not be reached or kept reporting transient errors.
    #[error("Generation service unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected the request or returned something unusable.
    #[error("Generation failed: {0}")]
    Failed(String),

    /// The backend finished without producing any output.
    #[error("Generation produced no output")]
    EmptyOutput,
}

// ---------------------------------------------------------------------------
// Image generation
// ---------------------------------------------------------------------------

/// Diffusion parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImageParams {
    pub steps: u32,
    pub guidance_scale: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for ImageParams {
    fn default() -> Self {
        Self {
            steps: 20,
            guidance_scale: 7.0,
            width: 512,
            height: 512,
        }
    }
}

/// Error raised by a progress observer. Never fails a generation.
#[derive(Debug, thiserror::Error)]
#[error("Progress report failed: {0}")]
pub struct ProgressError(pub String);

/// Receives best-effort progress updates (0-100) during image generation.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, percent: u8) -> Result<(), ProgressError>;
}

/// Observer that discards every update.
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _percent: u8) -> Result<(), ProgressError> {
        Ok(())
    }
}

/// Convert a step counter into a percentage, capped at 100.
pub fn progress_percent(step: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    (u64::from(step) * 100 / u64::from(total)).min(100) as u8
}

/// Text-to-image backend.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image and return it as PNG bytes.
    async fn generate(
        &self,
        prompt: &str,
        params: &ImageParams,
        observer: &dyn ProgressObserver,
    ) -> Result<Vec<u8>, GenerationError>;
}

// ---------------------------------------------------------------------------
// Text generation
// ---------------------------------------------------------------------------

/// Hosted text model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

// ---------------------------------------------------------------------------
// Image classification
// ---------------------------------------------------------------------------

/// One predicted label for an image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub label: String,
    /// Probability in `0.0..=1.0`.
    pub probability: f64,
}

/// Labels a fabric photo.
#[async_trait]
pub trait FabricClassifier: Send + Sync {
    /// Return the most likely labels, most probable first.
    async fn classify(&self, image: &[u8], mime_type: &str) -> Result<Vec<Classification>, GenerationError>;
}
