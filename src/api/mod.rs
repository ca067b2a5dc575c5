//! BIE Dashboard HTTP API
//!
//! HTTP layer built with Axum.
//!
//! # Endpoints
//!
//! - `GET /api/series` - Fetch one series (`id`, optional `from`/`to`)
//! - `GET /dashboard/` - Dashboard bundle (static files, SPA fallback)
//! - `GET /health` - Liveness with server time
//!
//! # Example
//!
//! ```rust,ignore
//! use bie_dashboard::api::{serve, AppState};
//! use bie_dashboard::config::Config;
//! use bie_dashboard::series::{InegiClient, SeriesFetcher};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let token = config.inegi.access_token()?;
//!     let client = InegiClient::new(config.inegi.clone(), token)?;
//!
//!     let state = AppState::new(SeriesFetcher::new(Arc::new(client)), config.api.clone());
//!     serve(state).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let dashboard_dir = state.config.dashboard_dir.clone();
    let dashboard = ServeDir::new(&dashboard_dir)
        .fallback(ServeFile::new(dashboard_dir.join("index.html")));

    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/api/series", get(routes::series::get_series))
        .route("/health", get(routes::health::health))
        .nest_service("/dashboard", dashboard)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET])
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let dashboard_dir = state.config.dashboard_dir.clone();
    let router = build_router(state);

    if !dashboard_dir.join("index.html").exists() {
        tracing::warn!(
            "Dashboard bundle not found in {:?}; build it with `trunk build` in bie-ui",
            dashboard_dir
        );
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("BIE dashboard listening on http://{}/dashboard/", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiConfig, InegiConfig};
    use crate::series::{
        FetchError, FetchResult, InegiClient, Observation, SeriesFetcher, SeriesId, SeriesSource,
    };
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use httpmock::prelude::*;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    /// In-memory provider that counts calls
    struct MockSource {
        result: Result<Vec<Observation>, fn() -> FetchError>,
        calls: AtomicUsize,
    }

    impl MockSource {
        fn ok(observations: Vec<Observation>) -> Arc<Self> {
            Arc::new(Self {
                result: Ok(observations),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(error: fn() -> FetchError) -> Arc<Self> {
            Arc::new(Self {
                result: Err(error),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SeriesSource for MockSource {
        fn name(&self) -> &str {
            "mock"
        }

        async fn fetch(&self, _series_id: &SeriesId) -> FetchResult<Vec<Observation>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Ok(observations) => Ok(observations.clone()),
                Err(make_error) => Err(make_error()),
            }
        }
    }

    fn create_test_app(source: Arc<dyn SeriesSource>) -> Router {
        let state = AppState::new(SeriesFetcher::new(source), ApiConfig::default());
        build_router(state)
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn observation_pairs(body: &Value) -> Vec<(String, Value)> {
        body["observations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| (o["date"].as_str().unwrap().to_string(), o["value"].clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_series_success_is_ordered() {
        let source = MockSource::ok(vec![
            Observation::new("2023-02-01", 12.0),
            Observation::new("2023-01-01", 10.0),
        ]);
        let app = create_test_app(source.clone());

        let response = get(app, "/api/series?id=SERIES123").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["series_id"], "SERIES123");
        assert_eq!(body["count"], 2);
        assert!(body.get("message").is_none());
        assert_eq!(
            observation_pairs(&body),
            vec![
                ("2023-01-01".to_string(), json!(10.0)),
                ("2023-02-01".to_string(), json!(12.0)),
            ]
        );
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_series_missing_id_skips_upstream() {
        let source = MockSource::ok(Vec::new());
        let app = create_test_app(source.clone());

        let response = get(app, "/api/series").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("id"));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_series_invalid_params_skip_upstream() {
        let source = MockSource::ok(Vec::new());

        for uri in [
            "/api/series?id=",
            "/api/series?id=a%2Fb",
            "/api/series?id=1&from=soon",
            "/api/series?id=1&from=2024/01&to=2023/01",
        ] {
            let response = get(create_test_app(source.clone()), uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_series_range_and_empty_message() {
        let source = MockSource::ok(vec![
            Observation::new("2004/12", 1.0),
            Observation::new("2005/01", 2.0),
            Observation::new("2005/02", None),
        ]);

        let response = get(
            create_test_app(source.clone()),
            "/api/series?id=910407&from=2005-01",
        )
        .await;
        let body = json_body(response).await;
        assert_eq!(body["from"], "2005/01");
        assert_eq!(body["to"], Value::Null);
        assert_eq!(
            observation_pairs(&body),
            vec![
                ("2005/01".to_string(), json!(2.0)),
                ("2005/02".to_string(), Value::Null),
            ]
        );

        let response = get(create_test_app(source), "/api/series?id=910407&from=2030").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["count"], 0);
        assert_eq!(body["message"], "No observations for the given parameters");
    }

    #[tokio::test]
    async fn test_series_mixed_precision_range() {
        let source = MockSource::ok(vec![
            Observation::new("2023/01/14", 1.0),
            Observation::new("2023/01/15", 2.0),
            Observation::new("2023/01/31", 3.0),
            Observation::new("2023/02/01", 4.0),
        ]);

        let response = get(
            create_test_app(source.clone()),
            "/api/series?id=910407&from=2023/01/15&to=2023/01",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["from"], "2023/01/15");
        assert_eq!(body["to"], "2023/01");
        assert_eq!(
            observation_pairs(&body),
            vec![
                ("2023/01/15".to_string(), json!(2.0)),
                ("2023/01/31".to_string(), json!(3.0)),
            ]
        );

        let response = get(
            create_test_app(source.clone()),
            "/api/series?id=910407&from=2023/06&to=2023",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_series_bad_query_string_uses_error_envelope() {
        let source = MockSource::ok(Vec::new());
        let response = get(create_test_app(source.clone()), "/api/series?id=1&id=2").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].is_string());
        assert!(body["request_id"].is_string());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_cors_allow_list() {
        let config = ApiConfig {
            cors_origins: vec![
                "http://localhost:8084".to_string(),
                "bad\norigin".to_string(),
            ],
            ..Default::default()
        };
        let state = AppState::new(SeriesFetcher::new(MockSource::ok(Vec::new())), config);

        let request = |origin: &str| {
            Request::builder()
                .uri("/health")
                .header("origin", origin)
                .body(Body::empty())
                .unwrap()
        };

        let response = build_router(state.clone())
            .oneshot(request("http://localhost:8084"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:8084"
        );

        let response = build_router(state)
            .oneshot(request("http://evil.example"))
            .await
            .unwrap();
        assert!(response.headers().get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn test_series_upstream_failure() {
        let source =
            MockSource::failing(|| FetchError::UpstreamUnavailable("connection refused".into()));
        let app = create_test_app(source.clone());

        let response = get(app, "/api/series?id=910407").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_UNAVAILABLE");
        assert_eq!(
            body["error"]["message"],
            "Upstream data provider is unavailable"
        );
        assert!(body["request_id"].is_string());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_series_malformed_upstream() {
        let source = MockSource::failing(|| FetchError::MalformedResponse("eof".into()));
        let response = get(create_test_app(source), "/api/series?id=910407").await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert!(!body["error"]["message"].as_str().unwrap().contains("eof"));
    }

    #[tokio::test]
    async fn test_health() {
        let response = get(create_test_app(MockSource::ok(Vec::new())), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["ts"].is_string());
    }

    #[tokio::test]
    async fn test_dashboard_served() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("index.html"),
            "<html><title>BIE Dashboard</title></html>",
        )
        .unwrap();

        let config = ApiConfig {
            dashboard_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let state = AppState::new(SeriesFetcher::new(MockSource::ok(Vec::new())), config);
        let app = build_router(state);

        for uri in ["/dashboard/", "/dashboard/index.html", "/dashboard/deep/link"] {
            let response = get(app.clone(), uri).await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");

            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            assert!(String::from_utf8_lossy(&bytes).contains("BIE Dashboard"));
        }
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = get(create_test_app(MockSource::ok(Vec::new())), "/api/other").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    fn inegi_app(base_url: &str) -> Router {
        let config = InegiConfig {
            token: Some("tok".to_string()),
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..Default::default()
        };
        let token = config.access_token().unwrap();
        let client = InegiClient::new(config, token).unwrap();
        create_test_app(Arc::new(client))
    }

    #[tokio::test]
    async fn test_end_to_end_with_mocked_inegi() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/INDICATOR/SERIES123/es/0700/false/BIE/2.0/tok");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(
                        json!({"Series": [{"OBSERVATIONS": [
                            {"TIME_PERIOD": "2023-02-01", "OBS_VALUE": "12"},
                            {"TIME_PERIOD": "2023-01-01", "OBS_VALUE": "10"}
                        ]}]})
                        .to_string(),
                    );
            })
            .await;

        let response = get(inegi_app(&server.base_url()), "/api/series?id=SERIES123").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["series_id"], "SERIES123");
        assert_eq!(
            observation_pairs(&body),
            vec![
                ("2023-01-01".to_string(), json!(10.0)),
                ("2023-02-01".to_string(), json!(12.0)),
            ]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_end_to_end_inegi_500() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(500);
            })
            .await;

        let response = get(inegi_app(&server.base_url()), "/api/series?id=910407").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_end_to_end_missing_id_never_calls_inegi() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200);
            })
            .await;

        let response = get(inegi_app(&server.base_url()), "/api/series").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mock.hits_async().await, 0);
    }
}
