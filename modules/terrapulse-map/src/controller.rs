use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use terrapulse_common::Project;

use crate::error::MapError;
use crate::fallback::water_stress_fallback;
use crate::features::project_feature_collection;
use crate::style::{self, OverlayVariant};
use crate::surface::{
    CameraTarget, Cursor, InputBinding, InputKind, MapInput, MapSurface, SourceSpec,
    SurfaceFactory, SurfaceOptions,
};

pub const MIN_OPACITY_PCT: u8 = 10;
pub const MAX_OPACITY_PCT: u8 = 100;

// ---------------------------------------------------------------------------
// Inputs mirrored onto the surface
// ---------------------------------------------------------------------------

/// Layer toggles and the water-stress opacity slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlaySettings {
    pub show_construction: bool,
    pub show_water_stress: bool,
    /// Percent, always within 10-100.
    pub water_stress_opacity: u8,
}

impl OverlaySettings {
    pub fn clamp_opacity(pct: i64) -> u8 {
        pct.clamp(MIN_OPACITY_PCT as i64, MAX_OPACITY_PCT as i64) as u8
    }

    pub fn opacity_fraction(&self) -> f64 {
        f64::from(self.water_stress_opacity) / 100.0
    }
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            show_construction: true,
            show_water_stress: true,
            water_stress_opacity: 55,
        }
    }
}

/// The slice of application state the surface mirrors.
#[derive(Debug, Clone, Copy)]
pub struct MapSnapshot<'a> {
    pub projects: &'a [Project],
    pub overlays: OverlaySettings,
    pub selected: Option<&'a Project>,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Identifies one mount. A ready signal carrying an older ticket belongs to a
/// disposed surface and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadyTicket(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapPhase {
    Uninitialized,
    Initializing,
    Loaded,
}

/// What the rest of the dashboard sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapStatus {
    /// No access credential configured; the map pane shows instructions.
    Unavailable,
    /// Credential present, surface not (yet) ready.
    Pending,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    Initializing(ReadyTicket),
    AlreadyMounted,
    Unavailable,
}

enum Lifecycle<S> {
    Uninitialized,
    Initializing { surface: S, ticket: ReadyTicket },
    Loaded { surface: S, overlay: OverlayVariant },
}

// ---------------------------------------------------------------------------
// MapController
// ---------------------------------------------------------------------------

/// Sole owner of the rendering surface.
///
/// Uninitialized → Initializing (mount, credential present) → Loaded (ready
/// signal) → Uninitialized (dispose). Sync operations are no-ops outside
/// Loaded; `on_ready` performs a full sync from the snapshot, so nothing
/// needs to be replayed.
pub struct MapController<F: SurfaceFactory> {
    factory: F,
    access_token: Option<String>,
    water_stress_tile_url: Option<String>,
    lifecycle: Lifecycle<F::Surface>,
    next_ticket: u64,
}

impl<F: SurfaceFactory> MapController<F> {
    pub fn new(
        factory: F,
        access_token: Option<String>,
        water_stress_tile_url: Option<String>,
    ) -> Self {
        Self {
            factory,
            access_token: access_token.filter(|t| !t.trim().is_empty()),
            water_stress_tile_url: water_stress_tile_url.filter(|u| !u.trim().is_empty()),
            lifecycle: Lifecycle::Uninitialized,
            next_ticket: 1,
        }
    }

    pub fn phase(&self) -> MapPhase {
        match self.lifecycle {
            Lifecycle::Uninitialized => MapPhase::Uninitialized,
            Lifecycle::Initializing { .. } => MapPhase::Initializing,
            Lifecycle::Loaded { .. } => MapPhase::Loaded,
        }
    }

    pub fn status(&self) -> MapStatus {
        if self.access_token.is_none() {
            return MapStatus::Unavailable;
        }
        match self.lifecycle {
            Lifecycle::Loaded { .. } => MapStatus::Ready,
            _ => MapStatus::Pending,
        }
    }

    /// Ticket the host must hand back to `on_ready`, while initializing.
    pub fn pending_ticket(&self) -> Option<ReadyTicket> {
        match self.lifecycle {
            Lifecycle::Initializing { ticket, .. } => Some(ticket),
            _ => None,
        }
    }

    /// Create the surface. Without a credential the controller stays
    /// Uninitialized and reports degraded mode.
    pub fn mount(&mut self) -> Result<MountOutcome, MapError> {
        let Some(token) = self.access_token.clone() else {
            info!("No map access token configured, running without a map");
            return Ok(MountOutcome::Unavailable);
        };
        if !matches!(self.lifecycle, Lifecycle::Uninitialized) {
            return Ok(MountOutcome::AlreadyMounted);
        }

        let surface = self.factory.create(&SurfaceOptions {
            access_token: token,
            style_url: style::STYLE_URL.to_string(),
            camera: style::initial_camera(),
        })?;

        let ticket = ReadyTicket(self.next_ticket);
        self.next_ticket += 1;
        self.lifecycle = Lifecycle::Initializing { surface, ticket };
        info!(ticket = ticket.0, "Map surface created, waiting for ready signal");
        Ok(MountOutcome::Initializing(ticket))
    }

    /// Handle the surface's ready signal. Installs sources, layers and input
    /// bindings, then syncs everything from `snapshot`.
    ///
    /// Returns `Ok(false)` for a stale or unexpected signal (including one
    /// arriving after `dispose`).
    pub fn on_ready(&mut self, ticket: ReadyTicket, snapshot: MapSnapshot<'_>) -> Result<bool, MapError> {
        let current = std::mem::replace(&mut self.lifecycle, Lifecycle::Uninitialized);
        let mut surface = match current {
            Lifecycle::Initializing { surface, ticket: expected } if expected == ticket => surface,
            other => {
                self.lifecycle = other;
                debug!(ticket = ticket.0, "Ignoring stale map ready signal");
                return Ok(false);
            }
        };

        let overlay = match self.install(&mut surface, snapshot.overlays) {
            Ok(overlay) => overlay,
            Err(e) => {
                warn!(error = %e, "Map install failed, releasing surface");
                surface.remove();
                return Err(e);
            }
        };
        self.lifecycle = Lifecycle::Loaded { surface, overlay };
        info!(ticket = ticket.0, ?overlay, "Map loaded");

        self.sync_projects(snapshot.projects)?;
        self.sync_overlays(snapshot.overlays)?;
        self.follow(snapshot.selected);
        Ok(true)
    }

    fn install(&self, surface: &mut F::Surface, overlays: OverlaySettings) -> Result<OverlayVariant, MapError> {
        surface.add_source(
            style::PROJECT_SOURCE,
            SourceSpec::GeoJson {
                data: project_feature_collection(&[]),
            },
        )?;
        surface.add_layer(style::construction_fill(overlays.show_construction))?;
        surface.add_layer(style::construction_outline(overlays.show_construction))?;

        let overlay = match &self.water_stress_tile_url {
            Some(url) => {
                surface.add_source(
                    style::WATER_STRESS_RASTER_SOURCE,
                    style::raster_overlay_source(url),
                )?;
                OverlayVariant::RasterTiles
            }
            None => {
                surface.add_source(
                    style::WATER_STRESS_FALLBACK_SOURCE,
                    SourceSpec::GeoJson {
                        data: water_stress_fallback(),
                    },
                )?;
                OverlayVariant::FallbackPolygons
            }
        };
        surface.add_layer(style::water_stress_layer(
            overlay,
            overlays.show_water_stress,
            overlays.opacity_fraction(),
        ))?;

        for kind in [InputKind::Click, InputKind::PointerEnter, InputKind::PointerLeave] {
            surface.bind(InputBinding {
                kind,
                layer_id: style::CONSTRUCTION_FILL.to_string(),
            })?;
        }
        Ok(overlay)
    }

    /// Replace the project source's data with the full collection.
    /// Returns whether the surface was touched.
    pub fn sync_projects(&mut self, projects: &[Project]) -> Result<bool, MapError> {
        let Lifecycle::Loaded { surface, .. } = &mut self.lifecycle else {
            return Ok(false);
        };
        surface.set_source_data(style::PROJECT_SOURCE, project_feature_collection(projects))?;
        debug!(count = projects.len(), "Synced project features");
        Ok(true)
    }

    /// Apply layer visibility and overlay opacity. Dropped silently until the
    /// style has fully loaded; a later change will carry the full settings.
    pub fn sync_overlays(&mut self, overlays: OverlaySettings) -> Result<bool, MapError> {
        let Lifecycle::Loaded { surface, overlay } = &mut self.lifecycle else {
            return Ok(false);
        };
        if !surface.is_style_loaded() {
            debug!("Style still loading, dropping overlay update");
            return Ok(false);
        }

        let construction = style::visibility(overlays.show_construction);
        surface.set_layout_property(style::CONSTRUCTION_FILL, "visibility", construction.clone())?;
        surface.set_layout_property(style::CONSTRUCTION_OUTLINE, "visibility", construction)?;
        surface.set_layout_property(
            style::WATER_STRESS_LAYER,
            "visibility",
            style::visibility(overlays.show_water_stress),
        )?;
        surface.set_paint_property(
            style::WATER_STRESS_LAYER,
            overlay.opacity_property(),
            serde_json::json!(overlays.opacity_fraction()),
        )?;
        Ok(true)
    }

    /// Animate to the selected project. A cleared selection leaves the camera
    /// where it is.
    pub fn follow(&mut self, selected: Option<&Project>) -> bool {
        let Some(project) = selected else {
            return false;
        };
        self.fly_to(CameraTarget {
            center: project.center,
            zoom: style::FOCUS_ZOOM,
            speed: Some(style::FLY_SPEED),
        })
    }

    pub fn fly_home(&mut self) -> bool {
        self.fly_to(style::home_camera())
    }

    fn fly_to(&mut self, camera: CameraTarget) -> bool {
        let Lifecycle::Loaded { surface, .. } = &mut self.lifecycle else {
            return false;
        };
        surface.fly_to(camera);
        true
    }

    /// Translate a surface input event. Returns the clicked project id, if
    /// any; hover events only change the cursor.
    pub fn handle_input(&mut self, input: &MapInput) -> Option<String> {
        let Lifecycle::Loaded { surface, .. } = &mut self.lifecycle else {
            return None;
        };
        match input {
            MapInput::Click { layer_id, features } if layer_id == style::CONSTRUCTION_FILL => features
                .first()
                .and_then(|props| props.get("project_id"))
                .and_then(|id| id.as_str())
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            MapInput::PointerEnter { layer_id } if layer_id == style::CONSTRUCTION_FILL => {
                surface.set_cursor(Cursor::Pointer);
                None
            }
            MapInput::PointerLeave { layer_id } if layer_id == style::CONSTRUCTION_FILL => {
                surface.set_cursor(Cursor::Default);
                None
            }
            _ => None,
        }
    }

    /// Release the surface and return to Uninitialized. Any ready signal
    /// still in flight for it becomes stale.
    pub fn dispose(&mut self) {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Uninitialized) {
            Lifecycle::Uninitialized => {}
            Lifecycle::Initializing { mut surface, .. } | Lifecycle::Loaded { mut surface, .. } => {
                surface.remove();
                info!("Map surface disposed");
            }
        }
    }
}
