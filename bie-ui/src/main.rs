//! BIE Dashboard
//!
//! Browser dashboard for INEGI BIE series, built with Leptos (WASM).
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Trunk builds it into `dist/`, which the `bie-dashboard`
//! server hosts under `/dashboard/`; data comes from `GET /api/series` on
//! the same origin.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
