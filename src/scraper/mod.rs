//! Profile Scraper
//!
//! Drives a bounded, sequential pagination loop against a [`SearchProvider`]
//! and collects de-duplicated LinkedIn profiles.
//!
//! ## Loop rules
//!
//! - Page `n` asks for `page_size` results at offset `n * page_size`; an offset
//!   that does not fit in `u32` ends the loop.
//! - A failed page is logged and skipped; it does not count as scraped.
//! - An empty page ends the loop, since later offsets will be empty too.
//! - After every non-empty page the loop waits `page_delay` before the next request.
//!
//! All state (seen-set, profiles, counters) lives inside one call.

pub mod profile;

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::ScrapeConfig;
use crate::models::{Profile, ScrapeResponse};
use crate::search::{SearchProvider, SearchQuery};

pub use profile::{build_query, clean_name, is_profile_url, LINKEDIN_PROFILE_MARKER};

/// Tunables for one scrape run
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub max_pages: u32,
    pub page_size: u32,
    pub page_delay: Duration,
    pub site_filter: String,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            max_pages: 10,
            page_size: 20,
            page_delay: Duration::from_millis(1500),
            site_filter: LINKEDIN_PROFILE_MARKER.to_string(),
        }
    }
}

impl From<&ScrapeConfig> for ScrapeSettings {
    fn from(config: &ScrapeConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            page_size: config.page_size,
            page_delay: Duration::from_millis(config.page_delay_ms),
            ..Self::default()
        }
    }
}

/// Page through search results for `keyword` and return every unique profile found.
///
/// Upstream failures never escape: the worst case is an empty response.
pub async fn scrape_profiles(
    provider: &dyn SearchProvider,
    keyword: &str,
    api_key: &str,
    settings: &ScrapeSettings,
) -> ScrapeResponse {
    let query = build_query(keyword, &settings.site_filter);
    info!(keyword = %keyword, query = %query, "Searching LinkedIn profiles");

    let mut seen: HashSet<String> = HashSet::new();
    let mut profiles: Vec<Profile> = Vec::new();
    let mut pages_scraped: u32 = 0;
    let mut pause_before_next = false;

    for page in 0..settings.max_pages {
        if pause_before_next {
            tokio::time::sleep(settings.page_delay).await;
        }
        pause_before_next = false;

        let Some(start) = page.checked_mul(settings.page_size) else {
            warn!(
                page = page + 1,
                page_size = settings.page_size,
                "Result offset overflows, stopping pagination"
            );
            break;
        };
        info!(page = page + 1, start, "Fetching results page");

        let request = SearchQuery {
            query: query.clone(),
            api_key: api_key.to_string(),
            num: settings.page_size,
            start,
        };

        let results = match provider.search_page(&request).await {
            Ok(results) => results,
            Err(e) => {
                warn!(page = page + 1, error = %e, "Search request failed, skipping page");
                continue;
            }
        };

        if results.is_empty() {
            info!(page = page + 1, "No more results, stopping pagination");
            break;
        }

        pages_scraped += 1;

        let before = profiles.len();
        for result in &results {
            if !is_profile_url(&result.link, &settings.site_filter) {
                continue;
            }
            if !seen.insert(result.link.clone()) {
                continue;
            }
            profiles.push(Profile::from_result(result));
        }
        debug!(
            page = page + 1,
            results = results.len(),
            accepted = profiles.len() - before,
            "Page processed"
        );

        pause_before_next = true;
    }

    info!(
        keyword = %keyword,
        pages_scraped,
        profiles_found = profiles.len(),
        "Scrape finished"
    );

    ScrapeResponse {
        keyword: keyword.to_string(),
        pages_scraped,
        profiles_found: profiles.len(),
        profiles,
    }
}
