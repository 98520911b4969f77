use axum::extract::State;
use axum::{routing::get, Json, Router};
use greenthreads_db::repositories::DesignRepo;
use greenthreads_db::schema::missing_design_columns;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store is unreachable or out of date.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
    /// Columns the `designs` table still lacks. Empty after reconciliation.
    pub missing_columns: Vec<&'static str>,
    /// `None` when the store could not be queried.
    pub design_count: Option<i64>,
    pub qr_codes_enabled: bool,
}

/// GET /health -- reports store reachability and schema state.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = greenthreads_db::health_check(&state.pool).await.is_ok();

    let missing_columns = if db_healthy {
        match missing_design_columns(&state.pool).await {
            Ok(missing) => missing.into_iter().map(|(name, _)| name).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not inspect designs table");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    let design_count = if db_healthy {
        DesignRepo::count(&state.pool).await.ok()
    } else {
        None
    };

    let status = if db_healthy && missing_columns.is_empty() && design_count.is_some() {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        missing_columns,
        design_count,
        qr_codes_enabled: state.config.qr_codes_enabled,
    })
}

/// Mount health check routes (root-level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
