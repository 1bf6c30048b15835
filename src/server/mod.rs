mod handlers;
mod state;

use axum::routing::{get, post};
use axum::Router;
use log::{error, info};
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::Config;

pub fn build_router(config: Config) -> Router {
    let state = Arc::new(AppState { config });

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/parse", post(handlers::parse))
        .route("/api/merge", post(handlers::merge))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(config: Config) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let app = build_router(config);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        error!("cannot bind to {}: {}", addr, e);
        e
    })?;

    info!("placemark server listening on http://{}", addr);
    axum::serve(listener, app).await
}
