//! Series Form Component
//!
//! Inputs for the series identifier and period bounds.

use leptos::*;

use crate::state::use_dashboard_state;

/// Series selection form. Submitting (button or Enter) reloads the chart.
#[component]
pub fn SeriesForm() -> impl IntoView {
    let state = use_dashboard_state();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        state.refresh();
    };

    view! {
        <form class="series-form" on:submit=on_submit>
            <TextField label="Indicator (e.g. 910407)" value=state.series_id />
            <TextField label="From (YYYY/MM)" value=state.from />
            <TextField label="To (optional)" value=state.to />

            <button
                type="submit"
                disabled=move || state.view.with(|view| view.is_loading())
            >
                {move || if state.view.with(|view| view.is_loading()) {
                    "Loading..."
                } else {
                    "Update"
                }}
            </button>
        </form>
    }
}

#[component]
fn TextField(label: &'static str, value: RwSignal<String>) -> impl IntoView {
    view! {
        <label>
            <span>{label}</span>
            <input
                type="text"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}
