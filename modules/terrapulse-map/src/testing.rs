// Recording surface for tests.
//
// RecordingFactory hands out RecordingSurfaces that write into shared
// state, so a test can keep a factory clone and inspect what the controller
// did after the factory has moved into it. Sources, layers and properties are
// tracked the way a real engine would hold them (last write wins), plus a flat
// call log for ordering assertions.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::error::MapError;
use crate::surface::{
    CameraTarget, Cursor, InputBinding, LayerSpec, MapSurface, SourceSpec, SurfaceFactory,
    SurfaceOptions,
};

/// Everything one surface has been told.
#[derive(Debug, Clone, Default)]
pub struct RecordedSurface {
    pub options: Option<SurfaceOptions>,
    pub sources: BTreeMap<String, SourceSpec>,
    pub layers: Vec<LayerSpec>,
    pub layout: BTreeMap<(String, String), serde_json::Value>,
    pub paint: BTreeMap<(String, String), serde_json::Value>,
    pub bindings: Vec<InputBinding>,
    pub cursor: Option<Cursor>,
    pub camera_moves: Vec<CameraTarget>,
    pub calls: Vec<String>,
    pub removed: bool,
}

impl RecordedSurface {
    pub fn source_data(&self, id: &str) -> Option<&serde_json::Value> {
        match self.sources.get(id)? {
            SourceSpec::GeoJson { data } => Some(data),
            SourceSpec::Raster { .. } => None,
        }
    }

    pub fn feature_count(&self, source_id: &str) -> usize {
        self.source_data(source_id)
            .and_then(|d| d["features"].as_array())
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layout_value(&self, layer_id: &str, name: &str) -> Option<&serde_json::Value> {
        self.layout.get(&(layer_id.to_string(), name.to_string()))
    }

    pub fn paint_value(&self, layer_id: &str, name: &str) -> Option<&serde_json::Value> {
        self.paint.get(&(layer_id.to_string(), name.to_string()))
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

struct FactoryState {
    surfaces: Vec<Arc<Mutex<RecordedSurface>>>,
    style_loaded: bool,
    fail_create: bool,
}

#[derive(Clone)]
pub struct RecordingFactory {
    state: Arc<Mutex<FactoryState>>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FactoryState {
                surfaces: Vec::new(),
                style_loaded: true,
                fail_create: false,
            })),
        }
    }

    /// Simulate style assets still streaming (or finished).
    pub fn set_style_loaded(&self, loaded: bool) {
        self.state.lock().unwrap().style_loaded = loaded;
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.state.lock().unwrap().fail_create = fail;
    }

    pub fn created(&self) -> usize {
        self.state.lock().unwrap().surfaces.len()
    }

    /// Snapshot of the most recently created surface.
    pub fn latest(&self) -> RecordedSurface {
        self.surface(self.created().saturating_sub(1))
    }

    pub fn surface(&self, index: usize) -> RecordedSurface {
        let state = self.state.lock().unwrap();
        state
            .surfaces
            .get(index)
            .map(|s| s.lock().unwrap().clone())
            .unwrap_or_default()
    }
}

impl Default for RecordingFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceFactory for RecordingFactory {
    type Surface = RecordingSurface;

    fn create(&mut self, options: &SurfaceOptions) -> Result<RecordingSurface, MapError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_create {
            return Err(MapError::Create("RecordingFactory: creation disabled".into()));
        }
        let recorded = Arc::new(Mutex::new(RecordedSurface {
            options: Some(options.clone()),
            ..RecordedSurface::default()
        }));
        state.surfaces.push(recorded.clone());
        Ok(RecordingSurface {
            recorded,
            factory: self.state.clone(),
        })
    }
}

pub struct RecordingSurface {
    recorded: Arc<Mutex<RecordedSurface>>,
    factory: Arc<Mutex<FactoryState>>,
}

impl RecordingSurface {
    fn with<T>(&self, f: impl FnOnce(&mut RecordedSurface) -> T) -> T {
        let mut recorded = self.recorded.lock().unwrap();
        assert!(!recorded.removed, "surface used after remove()");
        f(&mut recorded)
    }
}

impl MapSurface for RecordingSurface {
    fn add_source(&mut self, id: &str, source: SourceSpec) -> Result<(), MapError> {
        self.with(|r| {
            r.calls.push(format!("add_source:{id}"));
            if r.sources.contains_key(id) {
                return Err(MapError::DuplicateSource(id.to_string()));
            }
            r.sources.insert(id.to_string(), source);
            Ok(())
        })
    }

    fn add_layer(&mut self, layer: LayerSpec) -> Result<(), MapError> {
        self.with(|r| {
            r.calls.push(format!("add_layer:{}", layer.id));
            if !r.sources.contains_key(&layer.source) {
                return Err(MapError::UnknownSource(layer.source));
            }
            if r.layers.iter().any(|l| l.id == layer.id) {
                return Err(MapError::DuplicateLayer(layer.id));
            }
            if let Some(layout) = layer.layout.as_object() {
                for (name, value) in layout {
                    r.layout.insert((layer.id.clone(), name.clone()), value.clone());
                }
            }
            r.layers.push(layer);
            Ok(())
        })
    }

    fn set_source_data(&mut self, source_id: &str, data: serde_json::Value) -> Result<(), MapError> {
        self.with(|r| {
            r.calls.push(format!("set_source_data:{source_id}"));
            match r.sources.get_mut(source_id) {
                Some(SourceSpec::GeoJson { data: current }) => {
                    *current = data;
                    Ok(())
                }
                _ => Err(MapError::UnknownSource(source_id.to_string())),
            }
        })
    }

    fn set_layout_property(
        &mut self,
        layer_id: &str,
        name: &str,
        value: serde_json::Value,
    ) -> Result<(), MapError> {
        self.with(|r| {
            r.calls.push(format!("set_layout_property:{layer_id}:{name}"));
            if r.layer(layer_id).is_none() {
                return Err(MapError::UnknownLayer(layer_id.to_string()));
            }
            r.layout.insert((layer_id.to_string(), name.to_string()), value);
            Ok(())
        })
    }

    fn set_paint_property(
        &mut self,
        layer_id: &str,
        name: &str,
        value: serde_json::Value,
    ) -> Result<(), MapError> {
        self.with(|r| {
            r.calls.push(format!("set_paint_property:{layer_id}:{name}"));
            if r.layer(layer_id).is_none() {
                return Err(MapError::UnknownLayer(layer_id.to_string()));
            }
            r.paint.insert((layer_id.to_string(), name.to_string()), value);
            Ok(())
        })
    }

    fn bind(&mut self, binding: InputBinding) -> Result<(), MapError> {
        self.with(|r| {
            r.calls.push(format!("bind:{:?}:{}", binding.kind, binding.layer_id));
            r.bindings.push(binding);
            Ok(())
        })
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.with(|r| {
            r.calls.push(format!("set_cursor:{cursor:?}"));
            r.cursor = Some(cursor);
        })
    }

    fn fly_to(&mut self, camera: CameraTarget) {
        self.with(|r| {
            r.calls.push("fly_to".to_string());
            r.camera_moves.push(camera);
        })
    }

    fn is_style_loaded(&self) -> bool {
        self.factory.lock().unwrap().style_loaded
    }

    fn remove(&mut self) {
        self.with(|r| {
            r.calls.push("remove".to_string());
            r.removed = true;
        })
    }
}
