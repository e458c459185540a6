//! A surface with no screen behind it. Logs every call and keeps just enough
//! bookkeeping to reject calls a real engine would reject. Used by the CLI
//! to drive the dashboard end to end.

use std::collections::HashSet;

use tracing::info;

use crate::error::MapError;
use crate::surface::{
    CameraTarget, Cursor, InputBinding, LayerSpec, MapSurface, SourceSpec, SurfaceFactory,
    SurfaceOptions,
};

#[derive(Default)]
pub struct HeadlessSurface {
    sources: HashSet<String>,
    layers: HashSet<String>,
}

impl MapSurface for HeadlessSurface {
    fn add_source(&mut self, id: &str, source: SourceSpec) -> Result<(), MapError> {
        if !self.sources.insert(id.to_string()) {
            return Err(MapError::DuplicateSource(id.to_string()));
        }
        let kind = match source {
            SourceSpec::GeoJson { .. } => "geojson",
            SourceSpec::Raster { .. } => "raster",
        };
        info!(source = id, kind, "map: add source");
        Ok(())
    }

    fn add_layer(&mut self, layer: LayerSpec) -> Result<(), MapError> {
        if !self.sources.contains(&layer.source) {
            return Err(MapError::UnknownSource(layer.source));
        }
        if !self.layers.insert(layer.id.clone()) {
            return Err(MapError::DuplicateLayer(layer.id));
        }
        info!(layer = %layer.id, source = %layer.source, layout = %layer.layout, "map: add layer");
        Ok(())
    }

    fn set_source_data(&mut self, source_id: &str, data: serde_json::Value) -> Result<(), MapError> {
        if !self.sources.contains(source_id) {
            return Err(MapError::UnknownSource(source_id.to_string()));
        }
        let features = data["features"].as_array().map(Vec::len).unwrap_or(0);
        info!(source = source_id, features, "map: set data");
        Ok(())
    }

    fn set_layout_property(
        &mut self,
        layer_id: &str,
        name: &str,
        value: serde_json::Value,
    ) -> Result<(), MapError> {
        if !self.layers.contains(layer_id) {
            return Err(MapError::UnknownLayer(layer_id.to_string()));
        }
        info!(layer = layer_id, name, %value, "map: layout");
        Ok(())
    }

    fn set_paint_property(
        &mut self,
        layer_id: &str,
        name: &str,
        value: serde_json::Value,
    ) -> Result<(), MapError> {
        if !self.layers.contains(layer_id) {
            return Err(MapError::UnknownLayer(layer_id.to_string()));
        }
        info!(layer = layer_id, name, %value, "map: paint");
        Ok(())
    }

    fn bind(&mut self, binding: InputBinding) -> Result<(), MapError> {
        if !self.layers.contains(&binding.layer_id) {
            return Err(MapError::UnknownLayer(binding.layer_id));
        }
        Ok(())
    }

    fn set_cursor(&mut self, _cursor: Cursor) {}

    fn fly_to(&mut self, camera: CameraTarget) {
        info!(lng = camera.center[0], lat = camera.center[1], zoom = camera.zoom, "map: fly to");
    }

    fn is_style_loaded(&self) -> bool {
        true
    }

    fn remove(&mut self) {
        self.sources.clear();
        self.layers.clear();
    }
}

#[derive(Default)]
pub struct HeadlessFactory;

impl SurfaceFactory for HeadlessFactory {
    type Surface = HeadlessSurface;

    fn create(&mut self, options: &SurfaceOptions) -> Result<HeadlessSurface, MapError> {
        info!(style = %options.style_url, "map: create headless surface");
        Ok(HeadlessSurface::default())
    }
}
