//! Map lifecycle and sync controller.
//!
//! The rendering surface is an opaque imperative capability
//! ([`MapSurface`]): sources, layers, paint/layout properties, camera and
//! input bindings. [`MapController`] is its only owner. It creates the
//! surface, waits for the asynchronous ready signal, installs sources and
//! layers, and from then on mirrors application state onto it. Every call
//! site is guarded by an explicit readiness check; nothing is queued while
//! the surface is not ready, because readiness itself triggers a full sync.

pub mod controller;
pub mod error;
pub mod fallback;
pub mod features;
pub mod headless;
pub mod style;
pub mod surface;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use controller::{
    MapController, MapPhase, MapSnapshot, MapStatus, MountOutcome, OverlaySettings, ReadyTicket,
};
pub use error::MapError;
pub use headless::{HeadlessFactory, HeadlessSurface};
pub use surface::{
    CameraTarget, Cursor, InputBinding, InputKind, LayerKind, LayerSpec, MapInput, MapSurface,
    SourceSpec, SurfaceFactory, SurfaceOptions,
};
