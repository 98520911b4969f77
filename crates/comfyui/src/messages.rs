//! ComfyUI WebSocket message types and parser.
//!
//! ComfyUI sends JSON messages shaped `{"type": "<kind>", "data": {...}}`.

use serde::Deserialize;

/// The WebSocket messages the generator reacts to.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ComfyUIMessage {
    #[serde(rename = "status")]
    Status(serde_json::Value),

    #[serde(rename = "execution_start")]
    ExecutionStart(PromptRef),

    #[serde(rename = "execution_cached")]
    ExecutionCached(PromptRef),

    /// A node is executing; `node: null` marks the end of the prompt.
    #[serde(rename = "executing")]
    Executing(ExecutingData),

    /// Step progress from a long-running node such as the sampler.
    #[serde(rename = "progress")]
    Progress(ProgressData),

    #[serde(rename = "executed")]
    Executed(PromptRef),

    #[serde(rename = "execution_success")]
    ExecutionSuccess(PromptRef),

    #[serde(rename = "execution_error")]
    ExecutionError(ErrorData),
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptRef {
    pub prompt_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutingData {
    pub node: Option<String>,
    pub prompt_id: Option<String>,
}

/// Older servers omit `prompt_id` on progress messages.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressData {
    pub value: u32,
    pub max: u32,
    #[serde(default)]
    pub prompt_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorData {
    pub prompt_id: String,
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub exception_message: String,
    #[serde(default)]
    pub exception_type: String,
}

impl ComfyUIMessage {
    /// Whether this message concerns `prompt_id`. Messages without a
    /// prompt id are attributed to whatever is running.
    pub fn concerns(&self, prompt_id: &str) -> bool {
        let id = match self {
            Self::Status(_) => return false,
            Self::ExecutionStart(d) | Self::ExecutionCached(d) | Self::Executed(d) | Self::ExecutionSuccess(d) => {
                Some(d.prompt_id.as_str())
            }
            Self::Executing(d) => d.prompt_id.as_deref(),
            Self::Progress(d) => d.prompt_id.as_deref(),
            Self::ExecutionError(d) => Some(d.prompt_id.as_str()),
        };
        id.map_or(true, |id| id == prompt_id)
    }
}

/// Parse a text frame. Unknown message types are an error; callers skip them.
pub fn parse_message(text: &str) -> Result<ComfyUIMessage, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn progress_with_and_without_prompt_id() {
        let msg = parse_message(r#"{"type":"progress","data":{"value":5,"max":20,"prompt_id":"p","node":"3"}}"#).unwrap();
        assert_matches!(&msg, ComfyUIMessage::Progress(d) if d.value == 5 && d.max == 20);
        assert!(msg.concerns("p"));
        assert!(!msg.concerns("q"));

        let legacy = parse_message(r#"{"type":"progress","data":{"value":1,"max":20}}"#).unwrap();
        assert!(legacy.concerns("anything"));
    }

    #[test]
    fn executing_null_node_marks_completion() {
        let msg = parse_message(r#"{"type":"executing","data":{"node":null,"prompt_id":"p"}}"#).unwrap();
        assert_matches!(msg, ComfyUIMessage::Executing(ExecutingData { node: None, .. }));
    }

    #[test]
    fn execution_error_fields() {
        let json = r#"{"type":"execution_error","data":{"prompt_id":"p","node_id":"3","exception_message":"CUDA out of memory","exception_type":"RuntimeError","traceback":[]}}"#;
        assert_matches!(
            parse_message(json).unwrap(),
            ComfyUIMessage::ExecutionError(ErrorData { exception_message, .. }) if exception_message == "CUDA out of memory"
        );
    }

    #[test]
    fn status_messages_concern_no_prompt() {
        let msg = parse_message(r#"{"type":"status","data":{"status":{"exec_info":{"queue_remaining":0}}}}"#).unwrap();
        assert!(!msg.concerns("p"));
    }

    #[test]
    fn unknown_type_is_an_error() {
        assert!(parse_message(r#"{"type":"crystools.monitor","data":{}}"#).is_err());
        assert!(parse_message("not json").is_err());
    }
}
