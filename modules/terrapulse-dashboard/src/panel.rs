use std::fmt;

use terrapulse_common::{Project, ScenarioParameters, ScoreResult};
use terrapulse_scoring::CoolingBar;

/// Format a liter count in millions, e.g. `306.6M`.
pub fn format_millions(value: f64) -> String {
    format!("{:.1}M", value / 1_000_000.0)
}

/// What the scoring panel shows for the current state.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringPanel<'a> {
    /// Nothing selected (or the selection vanished on refresh).
    NoSelection,
    /// Scenario modelling switched off.
    Disabled { project: &'a Project },
    Ready {
        project: &'a Project,
        params: ScenarioParameters,
        score: ScoreResult,
        comparison: Vec<CoolingBar>,
    },
}

impl ScoringPanel<'_> {
    pub fn score(&self) -> Option<&ScoreResult> {
        match self {
            ScoringPanel::Ready { score, .. } => Some(score),
            _ => None,
        }
    }
}

impl fmt::Display for ScoringPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringPanel::NoSelection => writeln!(f, "Select a project on the map to model a data center."),
            ScoringPanel::Disabled { project } => {
                write_project(f, project)?;
                writeln!(f, "Enable \"Assume Data Center\" to model cooling scenarios.")
            }
            ScoringPanel::Ready {
                project,
                params,
                score,
                comparison,
            } => {
                write_project(f, project)?;
                writeln!(f, "Scenario: {} / {}", params.size_mw.label(), params.cooling_type)?;
                writeln!(f, "Annual Water Use: {} liters", format_millions(score.annual_water_liters))?;
                writeln!(f, "Olympic Pools: {:.1}", score.olympic_pools)?;
                writeln!(f, "Impact Score: {} ({})", score.impact_score, score.tier)?;
                for bar in comparison {
                    let marker = if bar.selected { '*' } else { ' ' };
                    let filled = (bar.width_pct / 5.0).round() as usize;
                    writeln!(
                        f,
                        "{marker} {:<12} {:<20} {}L",
                        bar.cooling_type.as_str(),
                        "#".repeat(filled),
                        format_millions(bar.annual_water_liters)
                    )?;
                }
                Ok(())
            }
        }
    }
}

fn write_project(f: &mut fmt::Formatter<'_>, project: &Project) -> fmt::Result {
    writeln!(f, "{} ({})", project.name, project.project_id)?;
    writeln!(f, "Footprint: {:.1} acres", project.footprint_acres)?;
    writeln!(f, "Construction Intensity: {}/100", project.intensity_score)?;
    writeln!(f, "Water Stress: {:.0}%", project.water_stress_normalized * 100.0)
}
