//! Source/layer ids, camera presets and paint rules.

use serde_json::json;
use terrapulse_common::HOME_CENTER;

use crate::surface::{CameraTarget, LayerKind, LayerSpec, SourceSpec};

pub const STYLE_URL: &str = "mapbox://styles/mapbox/light-v11";

pub const PROJECT_SOURCE: &str = "projects";
pub const CONSTRUCTION_FILL: &str = "construction-fill";
pub const CONSTRUCTION_OUTLINE: &str = "construction-outline";

pub const WATER_STRESS_RASTER_SOURCE: &str = "water-stress-raster";
pub const WATER_STRESS_FALLBACK_SOURCE: &str = "water-stress-fallback";
pub const WATER_STRESS_LAYER: &str = "water-stress-layer";

pub const RASTER_TILE_SIZE: u32 = 256;

pub const HOME_ZOOM: f64 = 8.9;
pub const FOCUS_ZOOM: f64 = 10.6;
pub const FLY_SPEED: f64 = 0.8;

/// Initial view when the surface is created (no animation).
pub fn initial_camera() -> CameraTarget {
    CameraTarget {
        center: HOME_CENTER,
        zoom: HOME_ZOOM,
        speed: None,
    }
}

pub fn home_camera() -> CameraTarget {
    CameraTarget {
        speed: Some(FLY_SPEED),
        ..initial_camera()
    }
}

/// Which water-stress overlay was installed. Decides the opacity paint path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayVariant {
    RasterTiles,
    FallbackPolygons,
}

impl OverlayVariant {
    pub fn opacity_property(&self) -> &'static str {
        match self {
            OverlayVariant::RasterTiles => "raster-opacity",
            OverlayVariant::FallbackPolygons => "fill-opacity",
        }
    }
}

pub fn construction_fill(visible: bool) -> LayerSpec {
    LayerSpec {
        id: CONSTRUCTION_FILL.to_string(),
        kind: LayerKind::Fill,
        source: PROJECT_SOURCE.to_string(),
        layout: json!({ "visibility": visibility(visible) }),
        paint: json!({
            "fill-color": [
                "interpolate", ["linear"], ["get", "intensity_score"],
                0, "#deebf7",
                40, "#9ecae1",
                70, "#3182bd",
                100, "#08519c"
            ],
            "fill-opacity": 0.55
        }),
    }
}

pub fn construction_outline(visible: bool) -> LayerSpec {
    LayerSpec {
        id: CONSTRUCTION_OUTLINE.to_string(),
        kind: LayerKind::Line,
        source: PROJECT_SOURCE.to_string(),
        layout: json!({ "visibility": visibility(visible) }),
        paint: json!({
            "line-color": "#0b2545",
            "line-width": 1.25
        }),
    }
}

pub fn raster_overlay_source(tile_url: &str) -> SourceSpec {
    SourceSpec::Raster {
        tiles: vec![tile_url.to_string()],
        tile_size: RASTER_TILE_SIZE,
    }
}

pub fn water_stress_layer(variant: OverlayVariant, visible: bool, opacity: f64) -> LayerSpec {
    match variant {
        OverlayVariant::RasterTiles => LayerSpec {
            id: WATER_STRESS_LAYER.to_string(),
            kind: LayerKind::Raster,
            source: WATER_STRESS_RASTER_SOURCE.to_string(),
            layout: json!({ "visibility": visibility(visible) }),
            paint: json!({ "raster-opacity": opacity }),
        },
        OverlayVariant::FallbackPolygons => LayerSpec {
            id: WATER_STRESS_LAYER.to_string(),
            kind: LayerKind::Fill,
            source: WATER_STRESS_FALLBACK_SOURCE.to_string(),
            layout: json!({ "visibility": visibility(visible) }),
            paint: json!({
                "fill-color": [
                    "interpolate", ["linear"], ["get", "stress"],
                    0.0, "#edf8b1",
                    0.5, "#7fcdbb",
                    1.0, "#2c7fb8"
                ],
                "fill-opacity": opacity
            }),
        },
    }
}

pub fn visibility(visible: bool) -> serde_json::Value {
    json!(if visible { "visible" } else { "none" })
}
