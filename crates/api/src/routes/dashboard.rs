use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes mounted at `/dashboard`.
///
/// ```text
/// GET  /          -> summary (?range=all_time|last_week|last_month|last_year)
/// GET  /ranges    -> available_ranges
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::summary))
        .route("/ranges", get(dashboard::available_ranges))
}
