use axum::routing::post;
use axum::Router;

use crate::handlers::textiles;
use crate::state::AppState;

/// ```text
/// POST /   -> generate_textile
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(textiles::generate_textile))
}
