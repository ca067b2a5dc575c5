//! # BIE Dashboard
//!
//! Fetches economic time-series from INEGI's BIE (Banco de Información
//! Económica), serves them through a small JSON API and hosts the browser
//! dashboard that charts them.
//!
//! ## Modules
//!
//! - [`series`]: Series fetcher and INEGI client
//! - [`api`]: HTTP API server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bie_dashboard::{build_router, AppState, Config, InegiClient, SeriesFetcher};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let token = config.inegi.access_token()?;
//!
//!     let client = InegiClient::new(config.inegi.clone(), token)?;
//!     let state = AppState::new(SeriesFetcher::new(Arc::new(client)), config.api.clone());
//!
//!     let listener = tokio::net::TcpListener::bind(config.api.addr()).await?;
//!     axum::serve(listener, build_router(state)).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod series;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, AppState};

pub use config::{AccessToken, ApiConfig, Config, ConfigError, InegiConfig, LogFormat, LoggingConfig};

pub use series::{
    DateRange, FetchError, InegiClient, Observation, Period, SeriesError, SeriesFetcher, SeriesId,
    SeriesQuery, SeriesResponse, SeriesSource,
};
