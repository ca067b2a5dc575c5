//! App Root Component
//!
//! Single dashboard page: series form, status alert, chart.

use leptos::*;

use crate::components::{ChartPanel, MetaLine, SeriesForm, StatusAlert};
use crate::state::provide_dashboard_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_dashboard_state();

    // Initial load with the default inputs. `refresh` reads untracked, so
    // this runs once.
    create_effect(move |_| state.refresh());

    view! {
        <div class="container">
            <h1>"INEGI Dashboard - BIE Series"</h1>
            <p class="muted">
                "Query an INEGI BIE series and chart it. The access token stays on the server."
            </p>

            <SeriesForm />
            <StatusAlert />
            <ChartPanel />

            <hr />
            <MetaLine />
        </div>
    }
}
