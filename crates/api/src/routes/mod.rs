pub mod care;
pub mod dashboard;
pub mod designs;
pub mod fabric;
pub mod health;
pub mod options;
pub mod production;
pub mod textiles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /options                                          form option lists
///
/// /designs                                          list
/// /designs/latest                                   most recent design
/// /designs/{id}                                     one design
/// /designs/{id}/image                               PNG download
/// /designs/{id}/qr-code                             care lookup QR code (PNG)
///
/// /dashboard                                        summary (?range=)
/// /dashboard/ranges                                 available time ranges
///
/// /fabric/analyze                                   classify + analyse a photo
/// /fabric/questions                                 predefined list, ask
///
/// /textiles                                         generate a textile concept
///
/// /production/recommendations                       production optimizer
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/options", options::router())
        .nest("/designs", designs::router())
        .nest("/dashboard", dashboard::router())
        .nest("/fabric", fabric::router())
        .nest("/textiles", textiles::router())
        .nest("/production", production::router())
}

/// Long-running generation routes under `/api/v1`.
///
/// These run until the generation flow finishes or fails, so they are
/// mounted outside the request timeout layer.
///
/// ```text
/// /designs                                          generate (POST)
/// ```
pub fn generation_routes() -> Router<AppState> {
    Router::new().nest("/designs", designs::generation_router())
}
