//! UI Components
//!
//! Leptos components for the dashboard page.

pub mod chart;
pub mod series_form;
pub mod status;

pub use chart::Chart;
pub use series_form::SeriesForm;
pub use status::{ChartPanel, MetaLine, StatusAlert};
