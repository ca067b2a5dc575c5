//! Chart View State
//!
//! The dashboard's single chart moves through
//! `Idle -> Loading -> (Displayed | Errored)` and back to `Loading` on the
//! next request. Each request carries a sequence number; a result for
//! anything but the request currently loading is dropped.

use crate::api::SeriesData;

/// What the chart area shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Waiting for the response to `request`
    Loading { request: u64 },
    /// Last request succeeded
    Displayed(SeriesData),
    /// Last request failed; the message replaces the chart
    Errored(String),
}

impl ViewState {
    /// Enter `Loading` for a new request, superseding any in flight.
    pub fn start(&mut self, request: u64) {
        *self = ViewState::Loading { request };
    }

    /// Apply the outcome of `request`.
    ///
    /// Returns `false` (and changes nothing) when `request` is not the one
    /// currently loading.
    pub fn finish(&mut self, request: u64, result: Result<SeriesData, String>) -> bool {
        let current = match self {
            ViewState::Loading { request } => *request,
            _ => return false,
        };
        if current != request {
            return false;
        }

        *self = match result {
            Ok(data) => ViewState::Displayed(data),
            Err(message) => ViewState::Errored(message),
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }

    /// Series to chart, if any
    pub fn series(&self) -> Option<&SeriesData> {
        match self {
            ViewState::Displayed(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Errored(message) => Some(message),
            _ => None,
        }
    }
}
