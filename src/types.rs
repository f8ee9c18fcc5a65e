// Error types shared by the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors caused by the caller's input. Upstream failures never surface here;
/// the scraper absorbs them page by page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to parse JSON")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Missing keyword or SerpAPI key")]
    MissingFields { received: serde_json::Value },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidJson(_) | AppError::MissingFields { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::InvalidJson(_) => json!({ "error": self.to_string() }),
            AppError::MissingFields { received } => json!({
                "error": self.to_string(),
                "received_data": received,
            }),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;
