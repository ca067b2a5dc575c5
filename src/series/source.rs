//! Upstream series sources

use async_trait::async_trait;

use super::error::FetchResult;
use super::types::{Observation, SeriesId};

/// Something that can produce the raw observations of a series.
///
/// One call is one upstream request. Implementations return observations in
/// whatever order the provider sent them; [`super::SeriesFetcher`] takes care
/// of ordering and range filtering.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Fetch every observation the provider has for `series_id`
    async fn fetch(&self, series_id: &SeriesId) -> FetchResult<Vec<Observation>>;
}
