//! API Client Module
//!
//! HTTP calls to the dashboard's own backend.

mod client;

pub use client::*;
