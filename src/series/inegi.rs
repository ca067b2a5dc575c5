//! INEGI BIE API Client
//!
//! HTTP client for the INEGI indicators API. Only the `INDICATOR` endpoint is
//! used, in its JSON flavor:
//!
//! ```text
//! {base}/INDICATOR/{id}/{language}/{geography}/{recent}/{source}/{version}/{token}?type=json
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};

use super::error::{FetchError, FetchResult};
use super::source::SeriesSource;
use super::types::{Observation, SeriesId};
use crate::config::{AccessToken, InegiConfig};

/// How much of an error body we keep for logs
const BODY_SNIPPET_LEN: usize = 200;

/// INEGI BIE REST API client
pub struct InegiClient {
    client: Client,
    config: InegiConfig,
    token: AccessToken,
}

impl InegiClient {
    /// Create a new client. The token must already be validated.
    pub fn new(config: InegiConfig, token: AccessToken) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("bie-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::UpstreamUnavailable(e.without_url().to_string()))?;

        Ok(Self {
            client,
            config,
            token,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &InegiConfig {
        &self.config
    }

    /// Full request URL for an indicator. Contains the token: never log it.
    fn indicator_url(&self, series_id: &SeriesId) -> String {
        format!(
            "{}/INDICATOR/{}/{}/{}/{}/{}/{}/{}?type=json",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(series_id.as_str()),
            self.config.language,
            self.config.geography,
            self.config.recent_only,
            self.config.source,
            self.config.version,
            urlencoding::encode(self.token.expose()),
        )
    }

    async fn request(&self, series_id: &SeriesId) -> FetchResult<String> {
        let started = Instant::now();

        let response = self
            .client
            .get(self.indicator_url(series_id))
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                if e.is_timeout() {
                    FetchError::UpstreamUnavailable("request timed out".to_string())
                } else {
                    FetchError::UpstreamUnavailable(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::UpstreamUnavailable(e.without_url().to_string()))?;

        tracing::debug!(
            series_id = %series_id,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "INEGI responded"
        );

        if !status.is_success() {
            return Err(FetchError::UpstreamStatus {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl SeriesSource for InegiClient {
    fn name(&self) -> &str {
        "inegi-bie"
    }

    async fn fetch(&self, series_id: &SeriesId) -> FetchResult<Vec<Observation>> {
        let body = self.request(series_id).await?;
        parse_indicator(&body)
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

// ============================================
// Wire format
// ============================================

#[derive(Debug, Deserialize)]
struct IndicatorEnvelope {
    #[serde(rename = "Series", default)]
    series: Vec<IndicatorSeries>,
}

#[derive(Debug, Deserialize)]
struct IndicatorSeries {
    #[serde(rename = "OBSERVATIONS", default)]
    observations: Option<Vec<IndicatorObservation>>,
}

#[derive(Debug, Deserialize)]
struct IndicatorObservation {
    #[serde(rename = "TIME_PERIOD")]
    time_period: String,
    #[serde(rename = "OBS_VALUE", default)]
    obs_value: Option<serde_json::Value>,
}

/// Parse an `INDICATOR` JSON body into observations (provider order).
fn parse_indicator(body: &str) -> FetchResult<Vec<Observation>> {
    let envelope: IndicatorEnvelope = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let series = envelope
        .series
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::MalformedResponse("no series in response".to_string()))?;

    Ok(series
        .observations
        .unwrap_or_default()
        .into_iter()
        .map(|obs| Observation {
            date: obs.time_period.trim().to_string(),
            value: obs.obs_value.as_ref().and_then(coerce_value),
        })
        .collect())
}

/// BIE sends values as strings, sometimes empty. Anything non-numeric is a gap.
fn coerce_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
