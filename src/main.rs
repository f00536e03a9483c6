use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use clinicbot::config::AppConfig;
use clinicbot::handlers;
use clinicbot::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    if config.whatsapp_number.is_empty() {
        tracing::warn!("WHATSAPP_NUMBER not set, using the default clinic number");
    }

    let state = Arc::new(AppState::new(config.clone()));

    // The widget is served from the static site's origin, so CORS is open.
    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/chat", post(handlers::chat::post_chat))
        .route(
            "/api/chat/:session_id/reset",
            post(handlers::chat::reset_session),
        )
        .route("/api/clinic", get(handlers::clinic::get_clinic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
