use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use greenthreads_api::config::ServerConfig;
use greenthreads_api::router::build_app_router;
use greenthreads_api::state::{AppState, Generators};
use greenthreads_comfyui::ComfyUIImageGenerator;
use greenthreads_gemini::{GeminiApi, GeminiFabricClassifier, GeminiTextGenerator};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greenthreads_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid configuration");
    tracing::info!(
        host = %config.host,
        port = %config.port,
        model = %config.gemini.model,
        qr_codes_enabled = config.qr_codes_enabled,
        "Loaded server configuration",
    );

    // --- Database ---
    let pool = greenthreads_db::create_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("Failed to open database");
    tracing::info!("Database connection pool created");

    greenthreads_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    greenthreads_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let added = greenthreads_db::schema::reconcile_design_columns(&pool)
        .await
        .expect("Failed to reconcile design table columns");
    if !added.is_empty() {
        tracing::info!(columns = ?added, "Legacy design table upgraded");
    }

    // --- Generative adapters ---
    let api = GeminiApi::new(&config.gemini.base_url, &config.gemini.api_key);
    let generators = Generators {
        images: Arc::new(ComfyUIImageGenerator::new(
            &config.comfyui.url,
            &config.comfyui.checkpoint,
        )),
        text: Arc::new(GeminiTextGenerator::new(
            api.clone(),
            &config.gemini.model,
            config.retry.clone(),
        )),
        fabric_text: Arc::new(GeminiTextGenerator::new(
            api.clone(),
            &config.gemini.fabric_model,
            config.retry.clone(),
        )),
        classifier: Arc::new(GeminiFabricClassifier::new(
            api,
            &config.gemini.fabric_model,
            config.retry.clone(),
        )),
    };

    // --- Router ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let app = build_app_router(AppState::new(pool, config, generators));

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
