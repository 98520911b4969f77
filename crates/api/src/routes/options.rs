use axum::routing::get;
use axum::Router;

use crate::handlers::options;
use crate::state::AppState;

/// ```text
/// GET  /   -> list_options
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(options::list_options))
}
