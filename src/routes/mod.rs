//! API Routes
//!
//! - `POST /scrape` - Search LinkedIn profiles for a keyword
//! - `GET /health` - Liveness check

pub mod health;
pub mod scrape;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::cors_layer;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    Router::new()
        .merge(scrape::router(state))
        .merge(health::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
