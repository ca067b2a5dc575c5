//! Series Fetcher
//!
//! Fetches economic time-series from INEGI's BIE and normalizes them into an
//! ordered list of observations.
//!
//! ## Architecture
//!
//! - **SeriesSource**: one upstream request, raw observations
//! - **InegiClient**: BIE implementation of `SeriesSource`
//! - **SeriesFetcher**: ordering, de-duplication and range filtering
//!
//! ## Example
//!
//! ```rust,no_run
//! use bie_dashboard::config::InegiConfig;
//! use bie_dashboard::series::{InegiClient, SeriesFetcher, SeriesId, SeriesQuery};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = InegiConfig {
//!     token: Some("my-token".to_string()),
//!     ..Default::default()
//! };
//! let token = config.access_token()?;
//! let fetcher = SeriesFetcher::new(Arc::new(InegiClient::new(config, token)?));
//!
//! let series = fetcher.fetch(&SeriesQuery::new(SeriesId::parse("910407")?)).await?;
//! println!("{} observations", series.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod fetcher;
mod inegi;
mod period;
mod source;
mod types;

pub use error::{FetchError, FetchResult, SeriesError};
pub use fetcher::SeriesFetcher;
pub use inegi::InegiClient;
pub use period::{DateRange, Period, Precision};
pub use source::SeriesSource;
pub use types::{Observation, SeriesId, SeriesQuery, SeriesResponse};
