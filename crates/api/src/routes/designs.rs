use axum::routing::{get, post};
use axum::Router;

use crate::handlers::designs;
use crate::state::AppState;

/// Design retrieval routes mounted at `/designs`.
///
/// ```text
/// GET  /                 -> list_designs
/// GET  /latest           -> get_latest
/// GET  /{id}             -> get_design
/// GET  /{id}/image       -> download_image
/// GET  /{id}/qr-code     -> qr_code
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(designs::list_designs))
        .route("/latest", get(designs::get_latest))
        .route("/{id}", get(designs::get_design))
        .route("/{id}/image", get(designs::download_image))
        .route("/{id}/qr-code", get(designs::qr_code))
}

/// Design generation, mounted at `/designs` outside the request timeout.
///
/// ```text
/// POST /                 -> create_design
/// ```
pub fn generation_router() -> Router<AppState> {
    Router::new().route("/", post(designs::create_design))
}
