//! Search Module
//!
//! Abstracts the web-search backend behind [`SearchProvider`] so the scraper
//! can page through results without knowing which API serves them.
//! The production backend is SerpAPI's Google engine.

pub mod serpapi;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use serpapi::SerpApiClient;

/// Errors that can occur while fetching one page of results
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Search request timed out")]
    Timeout,

    #[error("Search API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse search results: {0}")]
    ParseError(String),
}

/// Parameters for one page of a paginated search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Full query string sent to the engine
    pub query: String,
    /// Caller-supplied API key, forwarded as-is
    pub api_key: String,
    /// Number of results requested for this page
    pub num: u32,
    /// Zero-based result offset
    pub start: u32,
}

/// One organic (non-sponsored) search result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch a single page. `Ok(vec![])` means the engine has nothing more to give.
    async fn search_page(&self, query: &SearchQuery) -> Result<Vec<OrganicResult>, SearchError>;
}
