//! HTTP API Client
//!
//! Functions for communicating with the BIE dashboard API.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

/// Default API base URL (same origin as the dashboard)
pub const DEFAULT_API_BASE: &str = "/api";

/// Local storage key for overriding the API base
const API_BASE_KEY: &str = "bie_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

// ============ Response Types ============

/// One observation as served by `GET /api/series`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: String,
    pub value: Option<f64>,
}

/// Body of a successful `GET /api/series`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    pub series_id: String,
    pub observations: Vec<Observation>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Parameters for one series request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub series_id: String,
    pub from: String,
    pub to: String,
}

impl SeriesRequest {
    /// Query pairs, leaving out blank bounds
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("id", self.series_id.trim().to_string())];
        for (key, value) in [("from", &self.from), ("to", &self.to)] {
            let value = value.trim();
            if !value.is_empty() {
                pairs.push((key, value.to_string()));
            }
        }
        pairs
    }
}

/// Turn a failed response into the message shown in place of the chart
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| format!("Request failed with status {}", status))
}

// ============ API Functions ============

/// Fetch one series
pub async fn fetch_series(request: &SeriesRequest) -> Result<SeriesData, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/series", api_base))
        .query(request.query_pairs())
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(error_message(status, &body));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_skip_blank_bounds() {
        let request = SeriesRequest {
            series_id: " 910407 ".to_string(),
            from: "2005/01".to_string(),
            to: "  ".to_string(),
        };
        assert_eq!(
            request.query_pairs(),
            vec![("id", "910407".to_string()), ("from", "2005/01".to_string())]
        );
    }

    #[test]
    fn test_error_message_uses_envelope() {
        let body = r#"{"error":{"code":"UPSTREAM_UNAVAILABLE","message":"Upstream data provider is unavailable"},"request_id":"abc"}"#;
        assert_eq!(error_message(502, body), "Upstream data provider is unavailable");
    }

    #[test]
    fn test_error_message_fallback() {
        assert_eq!(error_message(500, "oops"), "Request failed with status 500");
    }

    #[test]
    fn test_series_data_parses_server_body() {
        let body = r#"{"series_id":"SERIES123","observations":[{"date":"2023-01-01","value":10.0},{"date":"2023-02-01","value":null}],"from":null,"to":null,"count":2}"#;
        let data: SeriesData = serde_json::from_str(body).unwrap();

        assert_eq!(data.series_id, "SERIES123");
        assert_eq!(data.count, 2);
        assert_eq!(data.observations[1].value, None);
        assert!(data.message.is_none());
    }
}
