//! Application state and event handling for the TerraPulse dashboard.
//!
//! Every state change is an event dispatched through the ordered engine:
//! the reducer applies it to [`AppState`], the router performs the side
//! effects (remote fetches, map sync) and may emit follow-up events. The
//! demo orchestrator emits the same events a user would.

pub mod dashboard;
pub mod demo;
pub mod events;
pub mod panel;
pub mod reducer;
pub mod router;
pub mod state;

pub use dashboard::Dashboard;
pub use demo::{clamp_step, highest_intensity, DemoAction, DemoStep, STEPS};
pub use events::{DashboardEvent, FetchKind};
pub use panel::{format_millions, ScoringPanel};
pub use reducer::DashboardReducer;
pub use router::{DashboardDeps, DashboardRouter};
pub use state::{AppState, DashboardError};
