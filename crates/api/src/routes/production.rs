use axum::routing::post;
use axum::Router;

use crate::handlers::production;
use crate::state::AppState;

/// ```text
/// POST /recommendations   -> recommend
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/recommendations", post(production::recommend))
}
