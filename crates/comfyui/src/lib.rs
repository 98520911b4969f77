//! ComfyUI client for text-to-image generation.
//!
//! REST wrappers, WebSocket message parsing, the txt2img workflow graph
//! and an [`ImageGenerator`](greenthreads_core::generation::ImageGenerator)
//! implementation tying them together.

pub mod api;
pub mod client;
pub mod generator;
pub mod messages;
pub mod workflow;

pub use generator::ComfyUIImageGenerator;
