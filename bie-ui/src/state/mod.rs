//! State Management
//!
//! Dashboard signals and the chart view state machine.

pub mod global;
pub mod view;

pub use global::{provide_dashboard_state, use_dashboard_state, DashboardState};
pub use view::ViewState;
