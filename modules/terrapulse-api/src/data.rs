//! Project data: a GeoJSON export when one is available, the bundled
//! Northern Virginia samples otherwise.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use tracing::{info, warn};

use terrapulse_common::{DataSource, Geometry, LngLat, Project, HOME_CENTER};

pub fn sample_projects() -> Vec<Project> {
    vec![
        sample(
            "nova-001",
            "Loudoun East Cluster",
            "Loudoun",
            (128.4, 426_000.0),
            89,
            "2024-03 to 2025-10",
            0.78,
            [-77.539, 39.078],
            ([-77.553, 39.071], [-77.525, 39.086]),
        ),
        sample(
            "nova-002",
            "Prince William West Expansion",
            "Prince William",
            (92.7, 311_500.0),
            74,
            "2024-05 to 2025-11",
            0.62,
            [-77.484, 38.792],
            ([-77.497, 38.785], [-77.468, 38.8]),
        ),
        sample(
            "nova-003",
            "Fairfax Utility Corridor Buildout",
            "Fairfax",
            (57.9, 194_000.0),
            61,
            "2024-02 to 2025-09",
            0.43,
            [-77.368, 38.91],
            ([-77.378, 38.903], [-77.353, 38.918]),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    name: &str,
    county: &str,
    (footprint_acres, change_area_m2): (f64, f64),
    intensity_score: u8,
    date_range: &str,
    water_stress_normalized: f64,
    center: LngLat,
    (sw, ne): (LngLat, LngLat),
) -> Project {
    Project {
        project_id: id.to_string(),
        name: name.to_string(),
        county: county.to_string(),
        footprint_acres,
        change_area_m2,
        intensity_score,
        date_range: date_range.to_string(),
        water_stress_normalized,
        center,
        geometry: Geometry::Polygon(vec![vec![
            sw,
            [ne[0], sw[1]],
            ne,
            [sw[0], ne[1]],
            sw,
        ]]),
    }
}

/// Load projects from a GeoJSON FeatureCollection at `path`.
///
/// A missing, unreadable, empty or invalid file falls back to the samples.
pub fn load_projects(path: &Path) -> (Vec<Project>, DataSource) {
    if !path.exists() {
        info!(path = %path.display(), "No GeoJSON export, serving sample projects");
        return (sample_projects(), DataSource::Sample);
    }

    match read_feature_collection(path) {
        Ok(projects) if !projects.is_empty() => {
            info!(path = %path.display(), count = projects.len(), "Loaded projects from GeoJSON");
            (projects, DataSource::Geojson)
        }
        Ok(_) => {
            warn!(path = %path.display(), "GeoJSON export has no features, serving sample projects");
            (sample_projects(), DataSource::Sample)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Invalid GeoJSON export, serving sample projects");
            (sample_projects(), DataSource::Sample)
        }
    }
}

fn read_feature_collection(path: &Path) -> Result<Vec<Project>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let payload: Value = serde_json::from_str(&raw).context("parsing GeoJSON")?;

    let features = match payload.get("features") {
        None => return Ok(Vec::new()),
        Some(Value::Array(features)) => features,
        Some(_) => return Err(anyhow!("\"features\" is not an array")),
    };

    features
        .iter()
        .enumerate()
        .map(|(i, feature)| project_from_feature(feature, i + 1))
        .collect()
}

/// Build a project from one feature, filling in defaults for missing
/// properties. `index` is 1-based.
pub fn project_from_feature(feature: &Value, index: usize) -> Result<Project> {
    let props = &feature["properties"];

    let project_id = text(props, "project_id")
        .or_else(|| text(props, "id"))
        .unwrap_or_else(|| format!("project-{index:03}"));

    let geometry = match feature.get("geometry") {
        Some(g) if !g.is_null() => serde_json::from_value::<Geometry>(g.clone())
            .with_context(|| format!("{project_id}: unsupported geometry"))?,
        _ => return Err(anyhow!("{project_id}: feature has no geometry")),
    };

    let center = match props.get("center") {
        Some(c) if !c.is_null() => serde_json::from_value::<LngLat>(c.clone())
            .with_context(|| format!("{project_id}: center must be [lng, lat]"))?,
        _ => geometry.bbox_center().unwrap_or(HOME_CENTER),
    };

    let intensity = number(props, "intensity_score").unwrap_or(50.0);
    if !(0.0..=100.0).contains(&intensity) {
        return Err(anyhow!("{project_id}: intensity_score {intensity} outside 0-100"));
    }

    let project = Project {
        name: text(props, "name").unwrap_or_else(|| format!("Project {index}")),
        county: text(props, "county").unwrap_or_else(|| "Unknown".to_string()),
        footprint_acres: number(props, "footprint_acres").unwrap_or(0.0),
        change_area_m2: number(props, "change_area_m2").unwrap_or(0.0),
        intensity_score: intensity as u8,
        date_range: text(props, "date_range").unwrap_or_else(|| "Unknown".to_string()),
        water_stress_normalized: number(props, "water_stress_normalized").unwrap_or(0.5),
        center,
        geometry,
        project_id,
    };
    project.validate()?;
    Ok(project)
}

/// Non-empty property as a string. Numbers are accepted for ids.
fn text(props: &Value, key: &str) -> Option<String> {
    match props.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(props: &Value, key: &str) -> Option<f64> {
    match props.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
