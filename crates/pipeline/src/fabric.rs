//! Fabric advisor: classify a photo, analyse it, answer questions about it.

use std::sync::Arc;

use greenthreads_core::error::CoreError;
use greenthreads_core::fabric::{
    analysis_prompt, answer_prompt, describe_classifications, MAX_QUESTION_LENGTH,
};
use greenthreads_core::generation::{Classification, FabricClassifier, TextGenerator};
use image::ImageFormat;
use serde::Serialize;

use crate::ServiceError;

#[derive(Debug, Clone, Serialize)]
pub struct FabricAnalysis {
    pub classifications: Vec<Classification>,
    /// Classifications rendered as `"label (12.34%)"`.
    pub description: String,
    pub analysis: String,
}

pub struct FabricAdvisor {
    classifier: Arc<dyn FabricClassifier>,
    text: Arc<dyn TextGenerator>,
}

impl FabricAdvisor {
    pub fn new(classifier: Arc<dyn FabricClassifier>, text: Arc<dyn TextGenerator>) -> Self {
        Self { classifier, text }
    }

    pub async fn analyze(&self, image: &[u8]) -> Result<FabricAnalysis, ServiceError> {
        let mime_type = image_mime_type(image)?;

        let classifications = self.classifier.classify(image, mime_type).await?;
        let description = describe_classifications(&classifications);
        tracing::debug!(%description, "Fabric classified");

        let analysis = self.text.generate(&analysis_prompt(&description)).await?;

        Ok(FabricAnalysis {
            classifications,
            description,
            analysis,
        })
    }

    pub async fn answer(&self, question: &str, fabric_analysis: &str) -> Result<String, ServiceError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(CoreError::Validation("Question must not be empty".into()).into());
        }
        if question.chars().count() > MAX_QUESTION_LENGTH {
            return Err(CoreError::Validation(format!(
                "Question exceeds maximum length of {MAX_QUESTION_LENGTH} characters"
            ))
            .into());
        }
        if fabric_analysis.trim().is_empty() {
            return Err(CoreError::Validation("Fabric analysis must not be empty".into()).into());
        }

        Ok(self.text.generate(&answer_prompt(question, fabric_analysis)).await?)
    }
}

/// Accepted upload formats: PNG, JPEG and WebP.
pub fn image_mime_type(bytes: &[u8]) -> Result<&'static str, CoreError> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => Ok("image/png"),
        Ok(ImageFormat::Jpeg) => Ok("image/jpeg"),
        Ok(ImageFormat::WebP) => Ok("image/webp"),
        _ => Err(CoreError::Validation(
            "Unsupported image format; upload a PNG, JPEG or WebP photo".into(),
        )),
    }
}
