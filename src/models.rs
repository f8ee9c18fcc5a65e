use std::sync::Arc;

use crate::config::Config;
use crate::search::SearchProvider;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub search: Arc<dyn SearchProvider>,
}

// API Request/Response types

/// Validated body of `POST /scrape`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub keyword: String,
    pub api_key: String,
}

impl ScrapeRequest {
    /// Pull both required fields out of an already-parsed body.
    ///
    /// Anything that is not a non-empty string (missing key, `null`, `""`,
    /// numbers, arrays) counts as missing.
    pub fn from_value(body: &serde_json::Value) -> Option<Self> {
        let field = |name: &str| {
            body.get(name)
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Some(Self {
            keyword: field("keyword")?,
            api_key: field("api_key")?,
        })
    }
}

/// One matched personal profile page.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Profile {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScrapeResponse {
    pub keyword: String,
    pub pages_scraped: u32,
    pub profiles_found: usize,
    pub profiles: Vec<Profile>,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
