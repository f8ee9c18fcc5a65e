use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub scrape: ScrapeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub serpapi_base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    pub max_pages: u32,
    pub page_size: u32,
    pub page_delay_ms: u64,
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 10000,
                host: "0.0.0.0".to_string(),
                cors_allowed_origins: vec!["*".to_string()],
            },
            search: SearchConfig {
                serpapi_base_url: crate::search::serpapi::DEFAULT_BASE_URL.to_string(),
                timeout_secs: 30,
            },
            scrape: ScrapeConfig {
                max_pages: 10,
                page_size: 20,
                page_delay_ms: 1500,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            server: ServerConfig {
                port: parse_var("PORT", defaults.server.port)?,
                host: env::var("HOST").unwrap_or(defaults.server.host),
                cors_allowed_origins: env::var("ALLOWED_ORIGINS")
                    .map(|origins| {
                        origins
                            .split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect()
                    })
                    .unwrap_or(defaults.server.cors_allowed_origins),
            },
            search: SearchConfig {
                serpapi_base_url: env::var("SERPAPI_BASE_URL")
                    .unwrap_or(defaults.search.serpapi_base_url),
                timeout_secs: parse_var("SERPAPI_TIMEOUT_SECS", defaults.search.timeout_secs)?,
            },
            scrape: ScrapeConfig {
                max_pages: parse_var("SCRAPE_MAX_PAGES", defaults.scrape.max_pages)?,
                page_size: parse_var("SCRAPE_PAGE_SIZE", defaults.scrape.page_size)?,
                page_delay_ms: parse_var("SCRAPE_PAGE_DELAY_MS", defaults.scrape.page_delay_ms)?,
            },
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}
