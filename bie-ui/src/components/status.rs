//! Status Components
//!
//! Inline alert above the chart and the chart panel itself.

use leptos::*;

use crate::components::Chart;
use crate::state::{use_dashboard_state, ViewState};

/// Alert style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Success,
    Warning,
    Danger,
}

impl AlertKind {
    fn class(self) -> &'static str {
        match self {
            AlertKind::Info => "alert alert-info",
            AlertKind::Success => "alert alert-success",
            AlertKind::Warning => "alert alert-warning",
            AlertKind::Danger => "alert alert-danger",
        }
    }
}

/// Alert text for a view state, if one should be shown
pub fn alert_for(view: &ViewState) -> Option<(AlertKind, String)> {
    match view {
        ViewState::Idle => None,
        ViewState::Loading { .. } => Some((AlertKind::Info, "Loading series...".to_string())),
        ViewState::Displayed(data) if data.observations.is_empty() => Some((
            AlertKind::Warning,
            data.message
                .clone()
                .unwrap_or_else(|| "No data for the given parameters.".to_string()),
        )),
        ViewState::Displayed(data) => Some((
            AlertKind::Success,
            format!("{} observations loaded.", data.observations.len()),
        )),
        ViewState::Errored(message) => Some((AlertKind::Danger, format!("Error: {}", message))),
    }
}

/// Inline status alert
#[component]
pub fn StatusAlert() -> impl IntoView {
    let state = use_dashboard_state();

    move || {
        state.view.with(alert_for).map(|(kind, message)| {
            view! { <div class=kind.class() role="alert">{message}</div> }
        })
    }
}

/// Chart area: spinner, chart, empty notice, or error indicator
#[component]
pub fn ChartPanel() -> impl IntoView {
    let state = use_dashboard_state();

    view! {
        <section class="chart-panel">
            {move || match state.view.get() {
                ViewState::Idle => view! { <div class="chart-empty" /> }.into_view(),
                ViewState::Loading { .. } => view! {
                    <div class="chart-empty">
                        <div class="loading-spinner" />
                    </div>
                }.into_view(),
                ViewState::Displayed(data) if data.observations.is_empty() => view! {
                    <div class="chart-empty">"No data"</div>
                }.into_view(),
                ViewState::Displayed(data) => view! { <Chart series=data /> }.into_view(),
                ViewState::Errored(_) => view! {
                    <div class="chart-empty alert-danger" role="alert">"Chart unavailable"</div>
                }.into_view(),
            }}
        </section>
    }
}

/// "Last update | From" footer line
#[component]
pub fn MetaLine() -> impl IntoView {
    let state = use_dashboard_state();

    view! {
        <small class="muted">
            {move || {
                state.last_updated.get().map(|ts| {
                    let from = state.applied_from.get().unwrap_or_else(|| "start".to_string());
                    format!("Last update: {} | From: {}", ts, from)
                })
            }}
        </small>
    }
}
