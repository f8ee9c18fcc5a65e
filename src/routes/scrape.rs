//! POST /scrape
//!
//! Body: `{"keyword": "...", "api_key": "..."}`. The body is parsed as JSON
//! whatever the declared content type.

use axum::{
    body::Bytes,
    extract::State,
    routing::post,
    Json, Router,
};
use tracing::{debug, info, warn};

use crate::models::{AppState, ScrapeRequest, ScrapeResponse};
use crate::scraper::{scrape_profiles, ScrapeSettings};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/scrape", post(scrape))
        .with_state(state)
}

async fn scrape(State(state): State<AppState>, body: Bytes) -> AppResult<Json<ScrapeResponse>> {
    let data: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Error reading JSON body");
        AppError::InvalidJson(e)
    })?;
    debug!(
        keyword = ?data.get("keyword"),
        has_api_key = data.get("api_key").is_some(),
        "Received scrape body"
    );

    let request = ScrapeRequest::from_value(&data).ok_or_else(|| {
        warn!("Missing required fields");
        AppError::MissingFields { received: data.clone() }
    })?;

    info!(keyword = %request.keyword, "Received scrape request");

    let settings = ScrapeSettings::from(&state.config.scrape);
    let response = scrape_profiles(
        state.search.as_ref(),
        &request.keyword,
        &request.api_key,
        &settings,
    )
    .await;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use mockito::Matcher;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::scraper::testing::{failure, profile_page, ScriptedProvider};
    use crate::search::{SearchProvider, SerpApiClient};

    fn state_with(search: Arc<dyn SearchProvider>) -> AppState {
        let mut config = Config::default();
        config.scrape.page_delay_ms = 0;
        AppState { config, search }
    }

    async fn post_scrape(
        state: AppState,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("POST").uri("/scrape");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(body.into()).unwrap();

        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let provider = Arc::new(ScriptedProvider::default());
        let (status, body) = post_scrape(
            state_with(provider.clone()),
            Some("application/json"),
            "{\"keyword\": ",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Failed to parse JSON" }));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_keyword_is_rejected() {
        let provider = Arc::new(ScriptedProvider::default());
        let sent = json!({ "keyword": "", "api_key": "abc" });
        let (status, body) = post_scrape(
            state_with(provider.clone()),
            Some("application/json"),
            sent.to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "error": "Missing keyword or SerpAPI key",
                "received_data": sent,
            })
        );
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key_is_rejected() {
        let provider = Arc::new(ScriptedProvider::default());
        let (status, body) = post_scrape(
            state_with(provider.clone()),
            Some("application/json"),
            r#"{"keyword": "cto"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["received_data"], json!({ "keyword": "cto" }));
        assert!(provider.calls().is_empty());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_receipt_logged_before_validation_without_api_key() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let provider = Arc::new(ScriptedProvider::default());
        let (status, _) = post_scrape(
            state_with(provider),
            Some("application/json"),
            r#"{"keyword": "", "api_key": "top-secret-key"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Received scrape body"));
        assert!(output.contains("Missing required fields"));
        assert!(!output.contains("top-secret-key"));
    }

    #[tokio::test]
    async fn test_body_parsed_without_json_content_type() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(profile_page(0, 3)), Ok(vec![])]));
        let (status, body) = post_scrape(
            state_with(provider),
            Some("text/plain"),
            r#"{"keyword": "recruiter", "api_key": "abc"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keyword"], "recruiter");
        assert_eq!(body["pages_scraped"], 1);
        assert_eq!(body["profiles_found"], 3);
        assert_eq!(
            body["profiles"][0],
            json!({ "name": "Person 0", "url": "https://www.linkedin.com/in/person-0" })
        );
    }

    #[tokio::test]
    async fn test_upstream_failures_still_return_ok() {
        let provider = Arc::new(ScriptedProvider::new((0..10).map(|_| failure()).collect()));
        let (status, body) = post_scrape(
            state_with(provider),
            None,
            r#"{"keyword": "ghost", "api_key": "abc"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "keyword": "ghost",
                "pages_scraped": 0,
                "profiles_found": 0,
                "profiles": [],
            })
        );
    }

    #[tokio::test]
    async fn test_end_to_end_against_serpapi_mock() {
        let mut server = mockito::Server::new_async().await;

        let mut mocks = Vec::new();
        for page in 0..3usize {
            let organic: Vec<Value> = profile_page(page * 20, 20)
                .into_iter()
                .map(|r| json!({ "title": r.title, "link": r.link }))
                .collect();
            let mock = server
                .mock("GET", "/search")
                .match_query(Matcher::UrlEncoded("start".into(), (page * 20).to_string()))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(json!({ "organic_results": organic }).to_string())
                .expect(1)
                .create_async()
                .await;
            mocks.push(mock);
        }
        let empty = server
            .mock("GET", "/search")
            .match_query(Matcher::UrlEncoded("start".into(), "60".into()))
            .with_status(200)
            .with_body(json!({ "organic_results": [] }).to_string())
            .expect(1)
            .create_async()
            .await;
        // Anything past the empty page must never be requested
        let beyond = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({ "organic_results": [] }).to_string())
            .expect(0)
            .create_async()
            .await;

        let client = SerpApiClient::new()
            .unwrap()
            .with_base_url(format!("{}/search", server.url()));
        let (status, body) = post_scrape(
            state_with(Arc::new(client)),
            Some("application/json"),
            r#"{"keyword": "product manager", "api_key": "abc"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pages_scraped"], 3);
        assert_eq!(body["profiles_found"], 60);
        assert_eq!(body["profiles"].as_array().unwrap().len(), 60);

        for mock in &mocks {
            mock.assert_async().await;
        }
        empty.assert_async().await;
        beyond.assert_async().await;
    }
}
