//! Dashboard aggregation over stored designs.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use greenthreads_core::dashboard::{
    available_time_ranges, filter_by_range, summarize, DashboardSummary, DesignSample, TimeRange,
};
use greenthreads_db::repositories::DesignRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Defaults to all time.
    pub range: Option<TimeRange>,
}

#[derive(Debug, Serialize)]
pub struct RangeOption {
    pub value: TimeRange,
    pub label: &'static str,
}

async fn load_samples(state: &AppState) -> AppResult<Vec<DesignSample>> {
    let rows = DesignRepo::list_samples(&state.pool).await?;
    Ok(rows.into_iter().map(DesignSample::from).collect())
}

/// GET /dashboard?range=
pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let range = query.range.unwrap_or(TimeRange::AllTime);
    let samples = load_samples(&state).await?;
    let in_range = filter_by_range(&samples, range, Utc::now());
    Ok(Json(DataResponse {
        data: summarize(&in_range),
    }))
}

/// GET /dashboard/ranges
pub async fn available_ranges(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<RangeOption>>>> {
    let samples = load_samples(&state).await?;
    let oldest = samples.iter().map(|s| s.created_at).min();
    let ranges = available_time_ranges(oldest, Utc::now())
        .into_iter()
        .map(|value| RangeOption {
            value,
            label: value.label(),
        })
        .collect();
    Ok(Json(DataResponse { data: ranges }))
}
