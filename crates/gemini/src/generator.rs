//! Core generation traits implemented over [`GeminiApi`].

use std::sync::Arc;

use async_trait::async_trait;
use greenthreads_core::fabric::TOP_LABELS;
use greenthreads_core::generation::{
    Classification, FabricClassifier, GenerationError, TextGenerator,
};
use serde::Deserialize;

use crate::api::{GeminiApi, GeminiApiError, Part};
use crate::retry::{retry, Clock, RetryPolicy, TokioClock};

const JSON_MIME: &str = "application/json";

const CLASSIFY_PROMPT: &str = "Identify the fabric or textile shown in this photo. \
Return a JSON array of up to five objects of the form {\"label\": string, \"probability\": number}, \
where label names a fabric, weave or material (e.g. \"denim\", \"wool knit\", \"linen\") and \
probability is your confidence between 0 and 1. Order the array from most to least likely.";

impl From<GeminiApiError> for GenerationError {
    fn from(err: GeminiApiError) -> Self {
        if err.is_transient() {
            return GenerationError::Unavailable(err.to_string());
        }
        match err {
            GeminiApiError::EmptyResponse => GenerationError::EmptyOutput,
            other => GenerationError::Failed(other.to_string()),
        }
    }
}

/// Shared call path: one model, the retry policy and the clock.
#[derive(Clone)]
struct ModelCaller {
    api: GeminiApi,
    model: String,
    policy: RetryPolicy,
    clock: Arc<dyn Clock>,
}

impl ModelCaller {
    async fn call(&self, parts: &[Part], mime: Option<&str>) -> Result<String, GenerationError> {
        let text = retry(
            &self.policy,
            self.clock.as_ref(),
            GeminiApiError::is_transient,
            || self.api.generate_content(&self.model, parts, mime),
        )
        .await?;
        Ok(text)
    }
}

/// Text generation against one model with bounded retry.
#[derive(Clone)]
pub struct GeminiTextGenerator {
    caller: ModelCaller,
}

impl GeminiTextGenerator {
    pub fn new(api: GeminiApi, model: impl Into<String>, policy: RetryPolicy) -> Self {
        Self::with_clock(api, model, policy, Arc::new(TokioClock))
    }

    pub fn with_clock(
        api: GeminiApi,
        model: impl Into<String>,
        policy: RetryPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            caller: ModelCaller {
                api,
                model: model.into(),
                policy,
                clock,
            },
        }
    }

    pub fn model(&self) -> &str {
        &self.caller.model
    }
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.caller.call(&[Part::text(prompt)], None).await
    }
}

/// Fabric photo classification through the multimodal model.
#[derive(Clone)]
pub struct GeminiFabricClassifier {
    caller: ModelCaller,
}

impl GeminiFabricClassifier {
    pub fn new(api: GeminiApi, model: impl Into<String>, policy: RetryPolicy) -> Self {
        Self::with_clock(api, model, policy, Arc::new(TokioClock))
    }

    pub fn with_clock(
        api: GeminiApi,
        model: impl Into<String>,
        policy: RetryPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            caller: ModelCaller {
                api,
                model: model.into(),
                policy,
                clock,
            },
        }
    }
}

#[async_trait]
impl FabricClassifier for GeminiFabricClassifier {
    async fn classify(&self, image: &[u8], mime_type: &str) -> Result<Vec<Classification>, GenerationError> {
        let parts = [Part::text(CLASSIFY_PROMPT), Part::inline(mime_type, image)];
        let text = self.caller.call(&parts, Some(JSON_MIME)).await?;
        parse_classifications(&text)
    }
}

#[derive(Deserialize)]
struct RawClassification {
    label: String,
    probability: f64,
}

/// Parse the model's JSON answer, tolerating a Markdown code fence.
///
/// Probabilities are clamped to `0..=1`, blank labels dropped, and the
/// result sorted most probable first and cut to [`TOP_LABELS`].
pub fn parse_classifications(text: &str) -> Result<Vec<Classification>, GenerationError> {
    let body = strip_code_fence(text);
    let raw: Vec<RawClassification> = serde_json::from_str(body)
        .map_err(|e| GenerationError::Failed(format!("Unexpected classification output: {e}")))?;

    let mut labels: Vec<Classification> = raw
        .into_iter()
        .filter(|c| !c.label.trim().is_empty() && c.probability.is_finite())
        .map(|c| Classification {
            label: c.label.trim().to_string(),
            probability: c.probability.clamp(0.0, 1.0),
        })
        .collect();

    if labels.is_empty() {
        return Err(GenerationError::EmptyOutput);
    }
    labels.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    labels.truncate(TOP_LABELS);
    Ok(labels)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
