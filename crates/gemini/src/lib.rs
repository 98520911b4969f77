//! Hosted Gemini model client.
//!
//! [`api::GeminiApi`] wraps the `generateContent` endpoint;
//! [`retry`] holds the bounded exponential backoff applied to transient
//! failures; [`generator`] implements the core text and fabric
//! classification traits on top of both.

pub mod api;
pub mod generator;
pub mod retry;

pub use api::{GeminiApi, GeminiApiError};
pub use generator::{GeminiFabricClassifier, GeminiTextGenerator};
pub use retry::{Clock, RetryPolicy, TokioClock};
