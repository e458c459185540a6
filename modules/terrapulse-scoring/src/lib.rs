//! Scenario scoring engine.
//!
//! Everything here is a pure, synchronous function of a `Project` and
//! `ScenarioParameters`: no I/O, no shared state, safe to call from any
//! thread or event handler.
//!
//! The WUE table in [`wue`] is the only place cooling-type water intensities
//! are written down; per-site scores, cooling comparisons and county
//! projections all read it.

pub mod compare;
pub mod county;
pub mod score;
pub mod wue;

pub use compare::{compare_cooling, CoolingBar, MIN_BAR_WIDTH_PCT};
pub use county::county_summaries;
pub use score::{
    annual_energy_kwh, impact_score, normalize_water_demand, score, tier_for_score,
    HOURS_PER_YEAR, LITERS_PER_OLYMPIC_POOL, MODERATE_THRESHOLD, HIGH_THRESHOLD,
};
pub use wue::{max_wue, wue_l_per_kwh};
