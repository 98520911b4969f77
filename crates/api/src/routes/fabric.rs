use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::fabric;
use crate::state::AppState;

/// Photo uploads above this size are rejected.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Fabric advisor routes mounted at `/fabric`.
///
/// ```text
/// POST /analyze      -> analyze (multipart `image`)
/// GET  /questions    -> list_questions
/// POST /questions    -> ask_question
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/analyze",
            post(fabric::analyze).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/questions",
            get(fabric::list_questions).post(fabric::ask_question),
        )
}
