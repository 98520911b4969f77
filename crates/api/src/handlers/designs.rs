//! Design generation and retrieval.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use greenthreads_core::care::care_url;
use greenthreads_core::design::DesignSelections;
use greenthreads_core::error::CoreError;
use greenthreads_core::types::DbId;
use greenthreads_db::models::design::{Design, DesignSummary};
use greenthreads_db::repositories::DesignRepo;
use greenthreads_pipeline::LoggingProgress;

use crate::error::{AppError, AppResult};
use crate::qr;
use crate::response::DataResponse;
use crate::state::AppState;

const IMAGE_FILENAME: &str = "sustainable_design.png";
const PNG: &str = "image/png";

fn design_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Design",
        id,
    })
}

/// POST /designs
///
/// Runs the whole generation flow. Generative failures never fail the
/// request; they show up as fallbacks and `warnings`. 201 when the design
/// was stored, 200 when it could not be.
///
/// The flow runs on its own task so the record is still stored when the
/// client goes away mid-generation.
pub async fn create_design(
    State(state): State<AppState>,
    Json(input): Json<DesignSelections>,
) -> AppResult<impl IntoResponse> {
    let request = input.resolve()?;
    tracing::info!(
        style = %request.style,
        clothing_type = %request.clothing_type,
        "Generating design",
    );

    let designs = state.designs.clone();
    let outcome = tokio::spawn(async move { designs.generate(request, &LoggingProgress).await })
        .await
        .map_err(|e| AppError::InternalError(format!("Design generation task failed: {e}")))?;

    let status = if outcome.design_id.is_some() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse { data: outcome })))
}

/// GET /designs
pub async fn list_designs(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DesignSummary>>>> {
    let designs = DesignRepo::list_summaries(&state.pool).await?;
    Ok(Json(DataResponse { data: designs }))
}

/// GET /designs/latest
pub async fn get_latest(State(state): State<AppState>) -> AppResult<Json<DataResponse<Design>>> {
    let design = DesignRepo::find_latest(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("No designs yet".into()))?;
    Ok(Json(DataResponse { data: design }))
}

/// GET /designs/{id}
pub async fn get_design(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DesignSummary>>> {
    let design = DesignRepo::find_summary_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| design_not_found(id))?;
    Ok(Json(DataResponse { data: design }))
}

/// GET /designs/{id}/image
pub async fn download_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let design = DesignRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| design_not_found(id))?;
    let image = design
        .design_image
        .ok_or_else(|| AppError::NotFound(format!("Design {id} has no image")))?;

    Ok((
        [
            (header::CONTENT_TYPE, PNG.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{IMAGE_FILENAME}\""),
            ),
        ],
        image,
    ))
}

/// GET /designs/{id}/qr-code
pub async fn qr_code(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let design = DesignRepo::find_summary_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| design_not_found(id))?;
    let qr_code_id = design
        .qr_code_id
        .ok_or_else(|| AppError::NotFound(format!("Design {id} has no QR code")))?;

    let url = care_url(&state.config.care_base_url(), &qr_code_id);
    let png = qr::render_png(&url)?;
    Ok(([(header::CONTENT_TYPE, PNG)], png))
}
