//! Bundled water-stress zones, used when no raster tile service is configured.

use serde_json::json;

struct StressZone {
    name: &'static str,
    stress: f64,
    /// West, south, east, north.
    bounds: [f64; 4],
}

const ZONES: [StressZone; 3] = [
    StressZone {
        name: "Loudoun Stress Zone",
        stress: 0.75,
        bounds: [-77.61, 39.0, -77.45, 39.16],
    },
    StressZone {
        name: "Prince William Stress Zone",
        stress: 0.58,
        bounds: [-77.58, 38.72, -77.36, 38.86],
    },
    StressZone {
        name: "Fairfax Stress Zone",
        stress: 0.41,
        bounds: [-77.5, 38.86, -77.22, 39.02],
    },
];

pub fn water_stress_fallback() -> serde_json::Value {
    let features: Vec<serde_json::Value> = ZONES
        .iter()
        .map(|zone| {
            let [w, s, e, n] = zone.bounds;
            json!({
                "type": "Feature",
                "properties": { "stress": zone.stress, "name": zone.name },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[w, s], [e, s], [e, n], [w, n], [w, s]]]
                }
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
