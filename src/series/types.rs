//! Core series types
//!
//! Defines the fundamental types handed between the fetcher and the API:
//! - SeriesId: validated provider series code
//! - Observation: one (date, value) point
//! - SeriesResponse: ordered observations for one series

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::SeriesError;
use super::period::DateRange;

/// Longest identifier we forward upstream
const MAX_SERIES_ID_LEN: usize = 64;

/// Provider series identifier (e.g. BIE indicator `910407`).
///
/// Opaque to this crate, but it ends up in a URL path segment so only
/// unreserved characters are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeriesId(String);

impl SeriesId {
    pub fn parse(input: &str) -> Result<Self, SeriesError> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(SeriesError::InvalidSeriesId("identifier is empty".to_string()));
        }
        if trimmed.len() > MAX_SERIES_ID_LEN {
            return Err(SeriesError::InvalidSeriesId(format!(
                "identifier longer than {} characters",
                MAX_SERIES_ID_LEN
            )));
        }
        if let Some(c) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        {
            return Err(SeriesError::InvalidSeriesId(format!(
                "unsupported character {:?}",
                c
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SeriesId {
    type Error = SeriesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SeriesId> for String {
    fn from(id: SeriesId) -> Self {
        id.0
    }
}

/// A single observation of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Period as reported by the provider
    pub date: String,
    /// Observed value; `None` when the provider reports no observation
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(date: impl Into<String>, value: impl Into<Option<f64>>) -> Self {
        Self {
            date: date.into(),
            value: value.into(),
        }
    }
}

/// What to fetch: one series, optionally bounded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesQuery {
    pub series_id: SeriesId,
    pub range: DateRange,
}

impl SeriesQuery {
    pub fn new(series_id: SeriesId) -> Self {
        Self {
            series_id,
            range: DateRange::unbounded(),
        }
    }

    pub fn range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }
}

/// Observations of one series in ascending period order.
///
/// Built per request and discarded once the response is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesResponse {
    pub series_id: SeriesId,
    pub observations: Vec<Observation>,
}

impl SeriesResponse {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_id_trims() {
        let id = SeriesId::parse("  910407 ").unwrap();
        assert_eq!(id.as_str(), "910407");
        assert_eq!(id.to_string(), "910407");
    }

    #[test]
    fn test_series_id_rejects() {
        assert!(SeriesId::parse("").is_err());
        assert!(SeriesId::parse("   ").is_err());
        assert!(SeriesId::parse("9104/07").is_err());
        assert!(SeriesId::parse("a b").is_err());
        assert!(SeriesId::parse("id?x=1").is_err());
        assert!(SeriesId::parse(&"9".repeat(65)).is_err());
        assert!(SeriesId::parse("SERIES_123-a.b").is_ok());
    }

    #[test]
    fn test_series_id_deserialize_validates() {
        let ok: SeriesId = serde_json::from_str("\"SERIES123\"").unwrap();
        assert_eq!(ok.as_str(), "SERIES123");
        assert!(serde_json::from_str::<SeriesId>("\"\"").is_err());
    }

    #[test]
    fn test_response_serialization_preserves_order() {
        let response = SeriesResponse {
            series_id: SeriesId::parse("SERIES123").unwrap(),
            observations: vec![
                Observation::new("2023/01", 10.0),
                Observation::new("2023/02", None),
                Observation::new("2023/03", 12.5),
            ],
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""series_id":"SERIES123""#));
        assert!(json.contains(r#"{"date":"2023/02","value":null}"#));

        let parsed: SeriesResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, response);
        assert_eq!(parsed.len(), 3);
    }
}
