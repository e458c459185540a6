use std::collections::HashMap;

use terrapulse_common::{CountySummary, Project, ScenarioParameters};

use crate::score::{round_to, score, tier_for_score};

/// Project every county as if each of its sites hosted the same scenario.
///
/// Counties appear in descending projected impact order (ties by name).
/// Always rebuilt from scratch; callers replace the previous list wholesale.
pub fn county_summaries(projects: &[Project], params: ScenarioParameters) -> Vec<CountySummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<&Project>> = HashMap::new();
    for project in projects {
        let bucket = grouped.entry(project.county.as_str()).or_default();
        if bucket.is_empty() {
            order.push(project.county.as_str());
        }
        bucket.push(project);
    }

    let mut summaries: Vec<CountySummary> = order
        .into_iter()
        .map(|county| summarize(county, &grouped[county], params))
        .collect();

    summaries.sort_by(|a, b| {
        b.projected_impact_score
            .total_cmp(&a.projected_impact_score)
            .then_with(|| a.county.cmp(&b.county))
    });
    summaries
}

fn summarize(county: &str, projects: &[&Project], params: ScenarioParameters) -> CountySummary {
    let count = projects.len() as f64;
    let total_change_area_m2: f64 = projects.iter().map(|p| p.change_area_m2).sum();
    let avg_stress = projects.iter().map(|p| p.water_stress_normalized).sum::<f64>() / count;
    let avg_intensity = projects.iter().map(|p| p.intensity_score as f64).sum::<f64>() / count;

    let scores: Vec<_> = projects.iter().map(|p| score(p, params)).collect();
    let projected_water: f64 = scores.iter().map(|s| s.annual_water_liters).sum();
    let projected_impact = scores.iter().map(|s| s.impact_score).sum::<f64>() / count;

    CountySummary {
        county: county.to_string(),
        project_count: projects.len(),
        total_change_area_m2: round_to(total_change_area_m2, 2),
        avg_stress: round_to(avg_stress, 3),
        avg_intensity: round_to(avg_intensity, 1),
        projected_annual_water_liters: round_to(projected_water, 2),
        projected_impact_score: round_to(projected_impact, 2),
        projected_tier: tier_for_score(projected_impact),
    }
}
