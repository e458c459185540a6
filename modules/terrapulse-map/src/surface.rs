use serde::{Deserialize, Serialize};
use terrapulse_common::LngLat;

use crate::error::MapError;

// ---------------------------------------------------------------------------
// Primitives handed to the surface
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceSpec {
    /// Inline GeoJSON FeatureCollection.
    GeoJson { data: serde_json::Value },
    /// Remote XYZ raster tiles.
    Raster { tiles: Vec<String>, tile_size: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Fill,
    Line,
    Raster,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: String,
    pub kind: LayerKind,
    pub source: String,
    /// Initial layout properties (e.g. `visibility`), applied on add.
    pub layout: serde_json::Value,
    pub paint: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTarget {
    pub center: LngLat,
    pub zoom: f64,
    /// Animation speed; `None` jumps without animating.
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    Default,
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Click,
    PointerEnter,
    PointerLeave,
}

/// Ask the surface to report `kind` events that hit `layer_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputBinding {
    pub kind: InputKind,
    pub layer_id: String,
}

/// An input event reported by the surface for a bound layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapInput {
    /// Click on a layer; `features` holds the properties of each hit feature,
    /// topmost first.
    Click {
        layer_id: String,
        features: Vec<serde_json::Value>,
    },
    PointerEnter { layer_id: String },
    PointerLeave { layer_id: String },
}

// ---------------------------------------------------------------------------
// MapSurface: the rendering engine capability
// ---------------------------------------------------------------------------

/// Imperative handle to a live map. Owned exclusively by `MapController`.
pub trait MapSurface: Send {
    fn add_source(&mut self, id: &str, source: SourceSpec) -> Result<(), MapError>;

    fn add_layer(&mut self, layer: LayerSpec) -> Result<(), MapError>;

    /// Replace a GeoJSON source's data wholesale.
    fn set_source_data(&mut self, source_id: &str, data: serde_json::Value) -> Result<(), MapError>;

    fn set_layout_property(
        &mut self,
        layer_id: &str,
        name: &str,
        value: serde_json::Value,
    ) -> Result<(), MapError>;

    fn set_paint_property(
        &mut self,
        layer_id: &str,
        name: &str,
        value: serde_json::Value,
    ) -> Result<(), MapError>;

    fn bind(&mut self, binding: InputBinding) -> Result<(), MapError>;

    fn set_cursor(&mut self, cursor: Cursor);

    /// Fire-and-forget camera animation.
    fn fly_to(&mut self, camera: CameraTarget);

    /// True once every style asset needed for paint updates has arrived.
    /// Stricter than the ready signal.
    fn is_style_loaded(&self) -> bool;

    /// Release the surface. No other method is called afterwards.
    fn remove(&mut self);
}

#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    pub access_token: String,
    pub style_url: String,
    pub camera: CameraTarget,
}

/// Creates surfaces. Creation returns immediately; readiness is reported
/// later, out of band, as `MapController::on_ready`.
pub trait SurfaceFactory: Send {
    type Surface: MapSurface;

    fn create(&mut self, options: &SurfaceOptions) -> Result<Self::Surface, MapError>;
}
