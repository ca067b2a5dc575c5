//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::series::SeriesResponse;

// ============================================
// SERIES DTOs
// ============================================

/// Query parameters of `GET /api/series`
#[derive(Debug, Default, Deserialize)]
pub struct SeriesParams {
    /// Series identifier (required)
    #[serde(default)]
    pub id: Option<String>,
    /// Inclusive lower bound, e.g. `2005/01`
    #[serde(default)]
    pub from: Option<String>,
    /// Inclusive upper bound
    #[serde(default)]
    pub to: Option<String>,
}

impl SeriesParams {
    /// Bound parameter, treating blank input as absent
    pub fn bound(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Body of a successful `GET /api/series`
#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesBody {
    /// `series_id` and the ordered `observations`
    #[serde(flatten)]
    pub series: SeriesResponse,
    /// Canonical lower bound applied, if any
    pub from: Option<String>,
    /// Canonical upper bound applied, if any
    pub to: Option<String>,
    /// Number of observations returned
    pub count: usize,
    /// Set when there are no observations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests
    pub status: String,
    /// Local server time, ISO 8601 to the second
    pub ts: String,
    /// Seconds since startup
    pub uptime_seconds: u64,
    /// Crate version
    pub version: String,
}
