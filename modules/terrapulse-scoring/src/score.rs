use terrapulse_common::{Project, ScenarioParameters, ScoreAssumptions, ScoreResult, SizeMw, Tier};

use crate::wue::{max_wue, wue_l_per_kwh};

pub const HOURS_PER_YEAR: f64 = 8760.0;

/// One Olympic pool is roughly 2,500 m³.
pub const LITERS_PER_OLYMPIC_POOL: f64 = 2_500_000.0;

/// Scores at or above this are Moderate.
pub const MODERATE_THRESHOLD: f64 = 34.0;
/// Scores at or above this are High.
pub const HIGH_THRESHOLD: f64 = 67.0;

const FORMULA: &str = "Impact Score = 100 x (Normalized Water Demand x Water Stress)";

/// Nameplate capacity running all year (capacity factor 1.0).
pub fn annual_energy_kwh(size: SizeMw) -> f64 {
    size.megawatts() as f64 * 1000.0 * HOURS_PER_YEAR
}

/// Water demand as a fraction of the largest supported facility running
/// the thirstiest cooling type, clamped to 0.0-1.0.
pub fn normalize_water_demand(annual_water_liters: f64) -> f64 {
    let ceiling = annual_energy_kwh(SizeMw::Hyperscale) * max_wue();
    (annual_water_liters / ceiling).clamp(0.0, 1.0)
}

/// Unrounded impact figure. Non-decreasing in both arguments.
pub fn impact_score(water_stress_normalized: f64, annual_water_liters: f64) -> f64 {
    100.0 * normalize_water_demand(annual_water_liters) * water_stress_normalized.clamp(0.0, 1.0)
}

pub fn tier_for_score(score: f64) -> Tier {
    if score >= HIGH_THRESHOLD {
        Tier::High
    } else if score >= MODERATE_THRESHOLD {
        Tier::Moderate
    } else {
        Tier::Low
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Score a what-if data center at `project` under `params`.
pub fn score(project: &Project, params: ScenarioParameters) -> ScoreResult {
    let wue = wue_l_per_kwh(params.cooling_type);
    let annual_energy_kwh = annual_energy_kwh(params.size_mw);
    let annual_water_liters = annual_energy_kwh * wue;
    let raw_impact = impact_score(project.water_stress_normalized, annual_water_liters);

    ScoreResult {
        annual_energy_kwh,
        annual_water_liters,
        olympic_pools: annual_water_liters / LITERS_PER_OLYMPIC_POOL,
        water_stress_normalized: project.water_stress_normalized,
        impact_score: round_to(raw_impact, 2),
        tier: tier_for_score(raw_impact),
        assumptions: ScoreAssumptions {
            size_mw: params.size_mw.megawatts(),
            cooling_type: params.cooling_type,
            wue_l_per_kwh: wue,
            formula: FORMULA.to_string(),
        },
    }
}
