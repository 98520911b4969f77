//! Health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, design_form, get, post_json};
use sqlx::SqlitePool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_store_state(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app.clone(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["missing_columns"], serde_json::json!([]));
    assert_eq!(json["design_count"], 0);
    assert_eq!(json["qr_codes_enabled"], false);

    post_json(app.clone(), "/api/v1/designs", design_form()).await;
    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["design_count"], 1);
}

#[sqlx::test(migrations = false)]
async fn legacy_table_reports_degraded(pool: SqlitePool) {
    sqlx::query(
        "CREATE TABLE designs (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             user_id TEXT,
             style TEXT,
             materials TEXT,
             clothing_type TEXT,
             production_method TEXT,
             custom_design TEXT,
             sustainability_score TEXT,
             timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
         )",
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app.clone(), "/health").await).await;

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], true);
    let missing = json["missing_columns"].as_array().unwrap();
    assert!(missing.contains(&"qr_code_id".into()));
    assert!(missing.contains(&"design_image".into()));
    assert!(!missing.contains(&"style".into()));

    greenthreads_db::schema::reconcile_design_columns(&pool).await.unwrap();
    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["status"], "ok");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_contains_x_request_id_header(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    let request_id = response.headers().get("x-request-id");
    assert!(request_id.is_some(), "Response must contain an x-request-id header");
    assert_eq!(request_id.unwrap().to_str().unwrap().len(), 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cors_preflight_allows_configured_origin(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/designs")
        .header("Origin", "http://localhost:8501")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:8501"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn options_lists_every_form(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/options").await).await;

    assert!(json["data"]["design"]["styles"]
        .as_array()
        .unwrap()
        .contains(&"Casual".into()));
    assert_eq!(json["data"]["design"]["max_materials"], 3);
    assert!(json["data"]["textile"]["base_materials"].is_array());
    assert!(json["data"]["production"]["climate_zones"].is_array());
}
