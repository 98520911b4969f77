//! Design generation flow.
//!
//! image -> advisories (plus care instructions when QR codes are on) ->
//! score -> persist. Every generative failure is
//! absorbed here: a missing image becomes a warning, a failed advisory
//! becomes its literal fallback, and a failed insert becomes a warning
//! with no design id. The caller always receives a [`DesignOutcome`].

use std::sync::Arc;

use futures::future::join_all;
use greenthreads_core::advisory::{strip_emphasis, AdvisoryKind, DESIGN_ADVISORIES};
use greenthreads_core::design::DesignRequest;
use greenthreads_core::generation::{
    ImageGenerator, ImageParams, ProgressError, ProgressObserver, TextGenerator,
};
use greenthreads_core::scoring::{extract_labeled_score, DEFAULT_SCORE};
use greenthreads_core::types::DbId;
use greenthreads_db::models::design::CreateDesign;
use greenthreads_db::repositories::DesignRepo;
use greenthreads_db::DbPool;
use serde::Serialize;

pub const IMAGE_FAILED_WARNING: &str = "Image generation failed. Please try again.";
pub const SAVE_FAILED_WARNING: &str = "Failed to save design to database.";

/// Settings that vary between deployments.
#[derive(Debug, Clone)]
pub struct DesignSettings {
    /// Requester id recorded on every design.
    pub user_id: String,
    /// Generate a QR lookup id and care instructions for each design.
    pub qr_codes_enabled: bool,
    pub image_params: ImageParams,
}

impl Default for DesignSettings {
    fn default() -> Self {
        Self {
            user_id: "default_user".to_string(),
            qr_codes_enabled: false,
            image_params: ImageParams::default(),
        }
    }
}

/// One advisory panel.
#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryReport {
    pub kind: AdvisoryKind,
    pub title: &'static str,
    /// Emphasis-stripped text, with the score line re-emphasised.
    pub text: String,
    pub score: Option<i64>,
    pub used_fallback: bool,
}

/// Everything produced for one design request.
#[derive(Debug, Clone, Serialize)]
pub struct DesignOutcome {
    /// `None` when the record could not be saved.
    pub design_id: Option<DbId>,
    pub request: DesignRequest,
    #[serde(skip)]
    pub image: Option<Vec<u8>>,
    pub has_image: bool,
    pub sustainability_score: i64,
    pub advisories: Vec<AdvisoryReport>,
    pub qr_code_id: Option<String>,
    pub care_instructions: Option<String>,
    pub warnings: Vec<String>,
}

impl DesignOutcome {
    pub fn advisory(&self, kind: AdvisoryKind) -> Option<&AdvisoryReport> {
        self.advisories.iter().find(|a| a.kind == kind)
    }
}

/// Progress observer that writes to the log.
pub struct LoggingProgress;

impl ProgressObserver for LoggingProgress {
    fn on_progress(&self, percent: u8) -> Result<(), ProgressError> {
        tracing::debug!(percent, "Design image progress");
        Ok(())
    }
}

pub struct DesignService {
    pool: DbPool,
    images: Arc<dyn ImageGenerator>,
    text: Arc<dyn TextGenerator>,
    settings: DesignSettings,
}

impl DesignService {
    pub fn new(
        pool: DbPool,
        images: Arc<dyn ImageGenerator>,
        text: Arc<dyn TextGenerator>,
        settings: DesignSettings,
    ) -> Self {
        Self {
            pool,
            images,
            text,
            settings,
        }
    }

    pub fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    /// Run the full flow for one request.
    pub async fn generate(&self, request: DesignRequest, observer: &dyn ProgressObserver) -> DesignOutcome {
        let mut warnings = Vec::new();

        let image = match self
            .images
            .generate(&request.image_prompt(), &self.settings.image_params, observer)
            .await
        {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(error = %e, "Image generation failed");
                warnings.push(IMAGE_FAILED_WARNING.to_string());
                None
            }
        };

        let mut kinds = DESIGN_ADVISORIES.to_vec();
        if self.settings.qr_codes_enabled {
            kinds.push(AdvisoryKind::CareInstructions);
        }
        let mut advisories: Vec<AdvisoryReport> =
            join_all(kinds.into_iter().map(|kind| self.advisory(kind, &request))).await;
        let care_index = advisories
            .iter()
            .position(|a| a.kind == AdvisoryKind::CareInstructions);
        let care = care_index.map(|i| advisories.remove(i));

        let sustainability_score = advisories
            .iter()
            .find(|a| a.kind == AdvisoryKind::OverallScore)
            .and_then(|a| a.score)
            .unwrap_or(DEFAULT_SCORE);

        let (qr_code_id, care_instructions) = match care {
            Some(care) => (Some(uuid::Uuid::new_v4().to_string()), Some(care.text)),
            None => (None, None),
        };

        let mut record = CreateDesign::from_request(&self.settings.user_id, &request, sustainability_score);
        record.design_image = image.clone();
        record.qr_code_id = qr_code_id.clone();
        record.care_instructions = care_instructions.clone();

        let design_id = match DesignRepo::create(&self.pool, &record).await {
            Ok(design) => {
                tracing::info!(design_id = design.id, sustainability_score, "Design saved");
                Some(design.id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save design");
                warnings.push(SAVE_FAILED_WARNING.to_string());
                None
            }
        };

        DesignOutcome {
            design_id,
            has_image: image.is_some(),
            image,
            request,
            sustainability_score,
            advisories,
            qr_code_id,
            care_instructions,
            warnings,
        }
    }

    /// Generate one advisory, substituting the literal fallback on failure.
    async fn advisory(&self, kind: AdvisoryKind, request: &DesignRequest) -> AdvisoryReport {
        let (raw, used_fallback) = match self.text.generate(&kind.prompt(request)).await {
            Ok(text) => (strip_emphasis(&text), false),
            Err(e) => {
                tracing::warn!(advisory = ?kind, error = %e, "Advisory generation failed, using fallback");
                (kind.fallback(request), true)
            }
        };

        let (text, score) = match kind.score_label() {
            Some(label) => {
                let extraction = extract_labeled_score(&raw, label);
                (extraction.annotated_text, Some(extraction.score))
            }
            None => (raw, None),
        };

        AdvisoryReport {
            kind,
            title: kind.title(),
            text,
            score,
            used_fallback,
        }
    }
}
