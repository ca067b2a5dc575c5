//! Dashboard State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

use crate::api::{self, SeriesRequest};
use crate::state::view::ViewState;

/// Series shown on first load
pub const DEFAULT_SERIES_ID: &str = "910407";

/// Default lower bound on first load
pub const DEFAULT_FROM: &str = "2005/01";

/// Dashboard state provided to all components
#[derive(Clone, Copy)]
pub struct DashboardState {
    /// Series identifier input
    pub series_id: RwSignal<String>,
    /// "From" period input
    pub from: RwSignal<String>,
    /// "To" period input
    pub to: RwSignal<String>,
    /// Chart view state
    pub view: RwSignal<ViewState>,
    /// Local time of the last successful load
    pub last_updated: RwSignal<Option<String>>,
    /// Bounds used by the last successful load
    pub applied_from: RwSignal<Option<String>>,
    next_request: StoredValue<u64>,
}

/// Provide dashboard state to the component tree
pub fn provide_dashboard_state() -> DashboardState {
    let state = DashboardState {
        series_id: create_rw_signal(DEFAULT_SERIES_ID.to_string()),
        from: create_rw_signal(DEFAULT_FROM.to_string()),
        to: create_rw_signal(String::new()),
        view: create_rw_signal(ViewState::default()),
        last_updated: create_rw_signal(None),
        applied_from: create_rw_signal(None),
        next_request: store_value(0),
    };

    provide_context(state);
    state
}

/// Get the dashboard state from context
pub fn use_dashboard_state() -> DashboardState {
    use_context::<DashboardState>().expect("DashboardState not found")
}

impl DashboardState {
    /// Current form inputs, read without subscribing
    pub fn request(&self) -> SeriesRequest {
        SeriesRequest {
            series_id: self.series_id.get_untracked(),
            from: self.from.get_untracked(),
            to: self.to.get_untracked(),
        }
    }

    /// Request the series for the current inputs and redraw when it lands.
    pub fn refresh(&self) {
        let request_id = self.next_request.get_value() + 1;
        self.next_request.set_value(request_id);

        let request = self.request();
        self.view.update(|view| view.start(request_id));

        let state = *self;
        spawn_local(async move {
            let result = api::fetch_series(&request).await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Failed to fetch series: {}", e).into());
            }

            let succeeded = result.is_ok();
            let mut applied = false;
            state
                .view
                .update(|view| applied = view.finish(request_id, result));

            if applied && succeeded {
                let from = state.view.with_untracked(|view| {
                    view.series().and_then(|data| data.from.clone())
                });
                state.applied_from.set(from);
                state
                    .last_updated
                    .set(Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()));
            }
        });
    }
}
