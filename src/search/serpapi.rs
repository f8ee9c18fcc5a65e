//! SerpAPI Client
//!
//! Fetches Google organic results through SerpAPI's JSON endpoint.
//!
//! ## Response handling
//!
//! - Transport failures, timeouts and non-2xx statuses are errors; the caller
//!   decides whether to skip the page.
//! - A JSON body without an `organic_results` array is an empty page, not an
//!   error. SerpAPI answers exhausted queries this way.
//! - Items are read leniently: a missing or non-string `title`/`link` becomes "".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::{OrganicResult, SearchError, SearchProvider, SearchQuery};

pub const DEFAULT_BASE_URL: &str = "https://serpapi.com/search";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const ENGINE: &str = "google";
/// Upper bound on how much of an error body is kept in [`SearchError::Status`]
const MAX_ERROR_BODY_BYTES: usize = 300;

/// SerpAPI client for Google web search
#[derive(Debug, Clone)]
pub struct SerpApiClient {
    http_client: Client,
    base_url: String,
}

impl SerpApiClient {
    /// Create a client against the public SerpAPI endpoint
    pub fn new() -> Result<Self, SearchError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a client whose every request is bounded by `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, SearchError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Configure client from config
    pub fn from_config(config: &crate::config::SearchConfig) -> Result<Self, SearchError> {
        Ok(Self::with_timeout(config.timeout())?.with_base_url(&config.serpapi_base_url))
    }

    /// Point the client at a different endpoint (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search_page(&self, query: &SearchQuery) -> Result<Vec<OrganicResult>, SearchError> {
        debug!(query = %query.query, num = query.num, start = query.start, "Querying SerpAPI");

        let num = query.num.to_string();
        let start = query.start.to_string();
        let params = [
            ("engine", ENGINE),
            ("q", query.query.as_str()),
            ("num", num.as_str()),
            ("start", start.as_str()),
            ("api_key", query.api_key.as_str()),
        ];

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout
                } else {
                    // reqwest errors embed the URL, which carries the api_key
                    SearchError::RequestFailed(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::Timeout
            } else {
                SearchError::RequestFailed(e.without_url().to_string())
            }
        })?;

        let json: Value =
            serde_json::from_str(&body).map_err(|e| SearchError::ParseError(e.to_string()))?;

        Ok(parse_organic_results(&json))
    }
}

fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY_BYTES {
        let mut cut = MAX_ERROR_BODY_BYTES;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    body
}

/// Extract organic results from a SerpAPI response body
fn parse_organic_results(json: &Value) -> Vec<OrganicResult> {
    let Some(items) = json.get("organic_results").and_then(|v| v.as_array()) else {
        if let Some(message) = json.get("error").and_then(|v| v.as_str()) {
            warn!(error = %message, "SerpAPI reported an error alongside an empty page");
        }
        return Vec::new();
    };

    items
        .iter()
        .map(|item| {
            let text = |key: &str| {
                item.get(key)
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string()
            };
            OrganicResult {
                title: text("title"),
                link: text("link"),
            }
        })
        .collect()
}
