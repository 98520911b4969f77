//! WebSocket connection to a ComfyUI server.

use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub type ComfyUIStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Connection settings for one ComfyUI server.
#[derive(Debug, Clone)]
pub struct ComfyUIClient {
    ws_url: String,
}

/// A live WebSocket connection addressed by `client_id`.
pub struct ComfyUIConnection {
    /// Sent with each submitted prompt so progress is routed here.
    pub client_id: String,
    pub ws_stream: ComfyUIStream,
}

#[derive(Debug, thiserror::Error)]
pub enum ComfyUIClientError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl ComfyUIClient {
    /// * `ws_url` - WebSocket base URL, e.g. `ws://127.0.0.1:8188`.
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self {
            ws_url: ws_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build from the HTTP base URL, swapping the scheme.
    pub fn from_api_url(api_url: &str) -> Self {
        Self::new(ws_url_for(api_url))
    }

    pub fn ws_url(&self) -> &str {
        &self.ws_url
    }

    /// Open `/ws?clientId=<uuid>`.
    pub async fn connect(&self) -> Result<ComfyUIConnection, ComfyUIClientError> {
        let client_id = uuid::Uuid::new_v4().to_string();
        let url = format!("{}/ws?clientId={}", self.ws_url, client_id);

        let (ws_stream, _response) = connect_async(url.as_str()).await.map_err(|e| {
            ComfyUIClientError::Connection(format!(
                "Failed to connect to ComfyUI at {}: {e}",
                self.ws_url
            ))
        })?;

        tracing::debug!(client_id = %client_id, "Connected to ComfyUI at {}", self.ws_url);

        Ok(ComfyUIConnection {
            client_id,
            ws_stream,
        })
    }
}

/// `http://` becomes `ws://` and `https://` becomes `wss://`.
pub fn ws_url_for(api_url: &str) -> String {
    let trimmed = api_url.trim_end_matches('/');
    if let Some(rest) = trimmed.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = trimmed.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        format!("ws://{trimmed}")
    }
}
