//! Public care lookup behind garment QR codes.

use axum::extract::{Path, State};
use axum::Json;
use greenthreads_db::models::design::CareLookup;
use greenthreads_db::repositories::DesignRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /care/{qr_code_id}
///
/// Returns the bare lookup object (no envelope) so printed QR codes keep
/// working if the API envelope changes.
pub async fn lookup(
    State(state): State<AppState>,
    Path(qr_code_id): Path<String>,
) -> AppResult<Json<CareLookup>> {
    let care = DesignRepo::find_care_by_qr_code(&state.pool, &qr_code_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No design for QR code {qr_code_id}")))?;
    Ok(Json(care))
}
