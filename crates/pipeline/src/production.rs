//! Production optimizer.

use std::sync::Arc;

use greenthreads_core::error::CoreError;
use greenthreads_core::generation::TextGenerator;
use greenthreads_core::production::ProductionDetails;
use serde::Serialize;

pub const PRODUCTION_FAILED_WARNING: &str =
    "Failed to generate production recommendations. Please try again.";

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutcome {
    pub summary: String,
    pub recommendations: Option<String>,
    pub warning: Option<String>,
}

pub struct ProductionOptimizer {
    text: Arc<dyn TextGenerator>,
}

impl ProductionOptimizer {
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self { text }
    }

    pub async fn recommend(&self, details: &ProductionDetails) -> Result<ProductionOutcome, CoreError> {
        details.validate()?;

        let (recommendations, warning) = match self.text.generate(&details.prompt()).await {
            Ok(text) => (Some(text), None),
            Err(e) => {
                tracing::warn!(location = %details.location, error = %e, "Production recommendations failed");
                (None, Some(PRODUCTION_FAILED_WARNING.to_string()))
            }
        };

        Ok(ProductionOutcome {
            summary: details.summary(),
            recommendations,
            warning,
        })
    }
}
