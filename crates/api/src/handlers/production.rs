use axum::extract::State;
use axum::Json;
use greenthreads_core::production::ProductionDetails;
use greenthreads_pipeline::ProductionOutcome;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /production/recommendations
pub async fn recommend(
    State(state): State<AppState>,
    Json(details): Json<ProductionDetails>,
) -> AppResult<Json<DataResponse<ProductionOutcome>>> {
    let outcome = state.production.recommend(&details).await?;
    Ok(Json(DataResponse { data: outcome }))
}
