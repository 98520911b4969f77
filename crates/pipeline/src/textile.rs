//! Innovative textile generator.

use std::sync::Arc;

use greenthreads_core::error::CoreError;
use greenthreads_core::generation::TextGenerator;
use greenthreads_core::textile::{TextileRequest, TextileSelections, NEXT_STEPS};
use serde::Serialize;

pub const TEXTILE_FAILED_WARNING: &str =
    "Failed to generate textile information. Please try again.";

#[derive(Debug, Clone, Serialize)]
pub struct TextileOutcome {
    pub request: TextileRequest,
    pub description: Option<String>,
    pub next_steps: &'static [&'static str],
    pub warning: Option<String>,
}

pub struct TextileGenerator {
    text: Arc<dyn TextGenerator>,
}

impl TextileGenerator {
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self { text }
    }

    /// Invalid selections are an error; a generation failure is a warning.
    pub async fn generate(&self, selections: &TextileSelections) -> Result<TextileOutcome, CoreError> {
        let request = selections.resolve()?;

        let (description, warning) = match self.text.generate(&request.prompt()).await {
            Ok(text) => (Some(text), None),
            Err(e) => {
                tracing::warn!(error = %e, "Textile generation failed");
                (None, Some(TEXTILE_FAILED_WARNING.to_string()))
            }
        };

        Ok(TextileOutcome {
            request,
            description,
            next_steps: NEXT_STEPS,
            warning,
        })
    }
}
