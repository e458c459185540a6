use serde::Serialize;
use terrapulse_common::{CoolingType, Project, ScenarioParameters, SizeMw, Tier};

use crate::score::{annual_energy_kwh, score};
use crate::wue::max_wue;

/// Narrowest bar drawn, as a percent of the track, so near-zero water use
/// stays visible.
pub const MIN_BAR_WIDTH_PCT: f64 = 2.0;

/// One row of the cooling-type comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoolingBar {
    pub cooling_type: CoolingType,
    pub annual_water_liters: f64,
    pub impact_score: f64,
    pub tier: Tier,
    /// Water use relative to the evaporative worst case at this size.
    pub fraction: f64,
    /// Rendered width in percent, never below `MIN_BAR_WIDTH_PCT`.
    pub width_pct: f64,
    pub selected: bool,
}

/// Score `project` at `size` under every cooling type, air first.
///
/// Bar widths share the denominator `size × 1000 × 8760 × max(WUE)`, so the
/// fractions are comparable across cooling types and sizes.
pub fn compare_cooling(project: &Project, size: SizeMw, selected: CoolingType) -> Vec<CoolingBar> {
    let worst_case = annual_energy_kwh(size) * max_wue();

    CoolingType::ALL
        .iter()
        .map(|&cooling_type| {
            let result = score(
                project,
                ScenarioParameters {
                    size_mw: size,
                    cooling_type,
                },
            );
            let fraction = result.annual_water_liters / worst_case;
            CoolingBar {
                cooling_type,
                annual_water_liters: result.annual_water_liters,
                impact_score: result.impact_score,
                tier: result.tier,
                fraction,
                width_pct: (fraction * 100.0).max(MIN_BAR_WIDTH_PCT),
                selected: cooling_type == selected,
            }
        })
        .collect()
}
