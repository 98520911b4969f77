//! [`ImageGenerator`] backed by a ComfyUI server.
//!
//! One generation opens a WebSocket, queues the txt2img graph, relays
//! sampler progress until the prompt finishes, then downloads the first
//! output image from the history.

use std::io::Cursor;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use greenthreads_core::generation::{
    progress_percent, GenerationError, ImageGenerator, ImageParams, ProgressObserver,
};
use tokio_tungstenite::tungstenite::{self, Message};

use crate::api::{output_images, ComfyUIApi, ComfyUIApiError};
use crate::client::{ComfyUIClient, ComfyUIClientError};
use crate::messages::{parse_message, ComfyUIMessage};
use crate::workflow;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

impl From<ComfyUIApiError> for GenerationError {
    fn from(err: ComfyUIApiError) -> Self {
        match err {
            ComfyUIApiError::Request(e) => GenerationError::Unavailable(e.to_string()),
            ComfyUIApiError::ApiError { status, body } if status >= 500 => {
                GenerationError::Unavailable(format!("ComfyUI returned {status}: {body}"))
            }
            ComfyUIApiError::ApiError { status, body } => {
                GenerationError::Failed(format!("ComfyUI rejected the request ({status}): {body}"))
            }
        }
    }
}

impl From<ComfyUIClientError> for GenerationError {
    fn from(err: ComfyUIClientError) -> Self {
        match err {
            ComfyUIClientError::Connection(msg) => GenerationError::Unavailable(msg),
            ComfyUIClientError::Protocol(msg) => GenerationError::Failed(msg),
        }
    }
}

pub struct ComfyUIImageGenerator {
    api: ComfyUIApi,
    client: ComfyUIClient,
    checkpoint: String,
}

impl ComfyUIImageGenerator {
    pub fn new(api_url: &str, checkpoint: impl Into<String>) -> Self {
        Self {
            api: ComfyUIApi::new(api_url),
            client: ComfyUIClient::from_api_url(api_url),
            checkpoint: checkpoint.into(),
        }
    }
}

#[async_trait]
impl ImageGenerator for ComfyUIImageGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: &ImageParams,
        observer: &dyn ProgressObserver,
    ) -> Result<Vec<u8>, GenerationError> {
        let mut connection = self.client.connect().await?;

        let seed = uuid::Uuid::new_v4().as_u128() as u64;
        let graph = workflow::txt2img(prompt, params, &self.checkpoint, seed);
        let submitted = self.api.submit_workflow(&graph, &connection.client_id).await?;
        tracing::info!(prompt_id = %submitted.prompt_id, queue_position = submitted.number, "Queued image generation");

        wait_for_completion(&mut connection.ws_stream, &submitted.prompt_id, observer).await?;

        let history = self.api.get_history(&submitted.prompt_id).await?;
        let image = output_images(&history, &submitted.prompt_id)
            .into_iter()
            .next()
            .ok_or(GenerationError::EmptyOutput)?;

        let bytes = self.api.view_image(&image).await?;
        if bytes.is_empty() {
            return Err(GenerationError::EmptyOutput);
        }
        ensure_png(bytes)
    }
}

/// Consume WebSocket frames until `prompt_id` finishes.
///
/// Progress is forwarded to `observer`; a failing observer is logged and
/// ignored. Ends with an error on `execution_error` or if the socket
/// closes first.
pub async fn wait_for_completion<S>(
    stream: &mut S,
    prompt_id: &str,
    observer: &dyn ProgressObserver,
) -> Result<(), GenerationError>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(frame) = stream.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(frame)) => {
                tracing::warn!(?frame, "ComfyUI closed the WebSocket before completion");
                break;
            }
            // Binary frames are live previews.
            Ok(_) => continue,
            Err(e) => {
                return Err(GenerationError::Unavailable(format!("WebSocket receive error: {e}")));
            }
        };

        let message = match parse_message(&text) {
            Ok(message) => message,
            Err(_) => {
                tracing::trace!("Skipping unrecognised ComfyUI message");
                continue;
            }
        };
        if !message.concerns(prompt_id) {
            continue;
        }

        match message {
            ComfyUIMessage::Progress(data) => {
                let percent = progress_percent(data.value, data.max);
                tracing::debug!(prompt_id, percent, "Image generation progress");
                if let Err(e) = observer.on_progress(percent) {
                    tracing::warn!(error = %e, "Progress observer failed");
                }
            }
            ComfyUIMessage::Executing(data) if data.node.is_none() => return Ok(()),
            ComfyUIMessage::ExecutionSuccess(_) => return Ok(()),
            ComfyUIMessage::ExecutionError(data) => {
                return Err(GenerationError::Failed(format!(
                    "{}: {}",
                    data.exception_type, data.exception_message
                )));
            }
            _ => {}
        }
    }

    Err(GenerationError::Unavailable(
        "ComfyUI connection ended before the image was produced".into(),
    ))
}

/// Return PNG bytes, re-encoding other formats.
pub fn ensure_png(bytes: Vec<u8>) -> Result<Vec<u8>, GenerationError> {
    if bytes.starts_with(PNG_SIGNATURE) {
        return Ok(bytes);
    }
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| GenerationError::Failed(format!("Unreadable image output: {e}")))?;
    let mut out = Cursor::new(Vec::new());
    decoded
        .write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| GenerationError::Failed(format!("PNG encoding failed: {e}")))?;
    Ok(out.into_inner())
}
