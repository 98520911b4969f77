use axum::routing::get;
use axum::Router;

use crate::handlers::care;
use crate::state::AppState;

/// Public care lookup, root-level so QR links stay short.
///
/// ```text
/// GET  /care/{qr_code_id}   -> lookup
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/care/{qr_code_id}", get(care::lookup))
}
