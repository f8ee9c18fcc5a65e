// Profile Scout - LinkedIn profile discovery over SerpAPI

pub mod config;
pub mod models;
pub mod types;
pub mod search;    // Search backends (SerpAPI Google engine)
pub mod scraper;   // Pagination loop and profile filtering
pub mod routes;
pub mod middleware;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
