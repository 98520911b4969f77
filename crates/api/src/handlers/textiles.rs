use axum::extract::State;
use axum::Json;
use greenthreads_core::textile::TextileSelections;
use greenthreads_pipeline::TextileOutcome;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /textiles
pub async fn generate_textile(
    State(state): State<AppState>,
    Json(input): Json<TextileSelections>,
) -> AppResult<Json<DataResponse<TextileOutcome>>> {
    let outcome = state.textiles.generate(&input).await?;
    Ok(Json(DataResponse { data: outcome }))
}
