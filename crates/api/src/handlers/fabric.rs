//! Fabric advisor: photo analysis and sustainability Q&A.

use axum::extract::{Multipart, State};
use axum::Json;
use greenthreads_core::fabric::SUSTAINABILITY_QUESTIONS;
use greenthreads_pipeline::FabricAnalysis;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the photo.
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    /// The `analysis` text returned by `/fabric/analyze`.
    pub fabric_analysis: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// POST /fabric/analyze
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<FabricAnalysis>>> {
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
            image = Some(bytes);
            break;
        }
    }
    let image = image
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing '{IMAGE_FIELD}' upload")))?;

    let analysis = state.fabric.analyze(&image).await?;
    Ok(Json(DataResponse { data: analysis }))
}

/// GET /fabric/questions
pub async fn list_questions() -> Json<DataResponse<&'static [&'static str]>> {
    Json(DataResponse {
        data: SUSTAINABILITY_QUESTIONS,
    })
}

/// POST /fabric/questions
pub async fn ask_question(
    State(state): State<AppState>,
    Json(input): Json<QuestionRequest>,
) -> AppResult<Json<DataResponse<AnswerResponse>>> {
    let answer = state
        .fabric
        .answer(&input.question, &input.fabric_analysis)
        .await?;
    Ok(Json(DataResponse {
        data: AnswerResponse { answer },
    }))
}
