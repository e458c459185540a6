use serde_json::json;
use terrapulse_common::Project;

/// Serialize the whole project collection as a GeoJSON FeatureCollection.
///
/// Each feature carries `project_id`, `name` and `intensity_score` as
/// queryable properties (the fill colour ramp and click handler read them).
/// Output depends only on the input, so re-syncing an unchanged collection
/// hands the surface identical data.
pub fn project_feature_collection(projects: &[Project]) -> serde_json::Value {
    let features: Vec<serde_json::Value> = projects
        .iter()
        .map(|project| {
            json!({
                "type": "Feature",
                "id": project.project_id,
                "geometry": project.geometry,
                "properties": {
                    "project_id": project.project_id,
                    "name": project.name,
                    "intensity_score": project.intensity_score,
                }
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrapulse_common::Geometry;

    fn project(id: &str, intensity: u8) -> Project {
        Project {
            project_id: id.into(),
            name: format!("Site {id}"),
            county: "Loudoun".into(),
            footprint_acres: 1.0,
            change_area_m2: 1.0,
            intensity_score: intensity,
            date_range: "Unknown".into(),
            water_stress_normalized: 0.5,
            center: [-77.5, 39.0],
            geometry: Geometry::Point([-77.5, 39.0]),
        }
    }

    #[test]
    fn features_carry_queryable_properties() {
        let fc = project_feature_collection(&[project("nova-001", 89)]);
        let feature = &fc["features"][0];
        assert_eq!(feature["properties"]["project_id"], "nova-001");
        assert_eq!(feature["properties"]["name"], "Site nova-001");
        assert_eq!(feature["properties"]["intensity_score"], 89);
        assert_eq!(feature["geometry"]["type"], "Point");
    }

    #[test]
    fn empty_collection_is_valid() {
        let fc = project_feature_collection(&[]);
        assert_eq!(fc["type"], "FeatureCollection");
        assert_eq!(fc["features"].as_array().map(Vec::len), Some(0));
    }
}
