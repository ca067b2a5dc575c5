//! Series Fetcher
//!
//! Turns raw provider observations into a [`SeriesResponse`]: parse each date,
//! sort ascending, drop duplicate periods and apply the requested range.

use std::sync::Arc;
use std::time::Instant;

use super::error::{FetchError, FetchResult};
use super::period::Period;
use super::source::SeriesSource;
use super::types::{Observation, SeriesQuery, SeriesResponse};

/// Fetches and normalizes series from a [`SeriesSource`]
#[derive(Clone)]
pub struct SeriesFetcher {
    source: Arc<dyn SeriesSource>,
}

impl SeriesFetcher {
    pub fn new(source: Arc<dyn SeriesSource>) -> Self {
        Self { source }
    }

    /// Name of the underlying source
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch one series. Exactly one upstream call per invocation.
    pub async fn fetch(&self, query: &SeriesQuery) -> FetchResult<SeriesResponse> {
        let started = Instant::now();
        let raw = self.source.fetch(&query.series_id).await?;
        let fetched = raw.len();

        let observations = normalize(raw, query)?;

        tracing::debug!(
            source = %self.source.name(),
            series_id = %query.series_id,
            fetched,
            returned = observations.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Series fetched"
        );

        Ok(SeriesResponse {
            series_id: query.series_id.clone(),
            observations,
        })
    }
}

fn normalize(raw: Vec<Observation>, query: &SeriesQuery) -> FetchResult<Vec<Observation>> {
    let mut keyed = raw
        .into_iter()
        .map(|obs| {
            Period::parse(&obs.date)
                .map(|period| (period, obs))
                .map_err(|e| FetchError::MalformedResponse(e.to_string()))
        })
        .collect::<FetchResult<Vec<_>>>()?;

    // Stable, so the first of two equal periods survives the dedup below.
    keyed.sort_by_key(|(period, _)| *period);

    let before = keyed.len();
    keyed.dedup_by_key(|(period, _)| *period);
    if keyed.len() != before {
        tracing::warn!(
            series_id = %query.series_id,
            dropped = before - keyed.len(),
            "Provider returned duplicate periods"
        );
    }

    Ok(keyed
        .into_iter()
        .filter(|(period, _)| query.range.contains(period))
        .map(|(_, obs)| obs)
        .collect())
}
