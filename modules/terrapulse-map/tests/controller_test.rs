//! Map lifecycle and sync behavior against a recording surface.
//!
//! Run with: cargo test -p terrapulse-map --test controller_test

use serde_json::json;

use terrapulse_common::{Geometry, Project};
use terrapulse_map::style::{
    CONSTRUCTION_FILL, CONSTRUCTION_OUTLINE, FOCUS_ZOOM, PROJECT_SOURCE,
    WATER_STRESS_FALLBACK_SOURCE, WATER_STRESS_LAYER, WATER_STRESS_RASTER_SOURCE,
};
use terrapulse_map::testing::RecordingFactory;
use terrapulse_map::{
    Cursor, InputKind, MapController, MapInput, MapPhase, MapSnapshot, MapStatus, MountOutcome,
    OverlaySettings, ReadyTicket,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn project(id: &str, center: [f64; 2]) -> Project {
    Project {
        project_id: id.into(),
        name: format!("Site {id}"),
        county: "Loudoun".into(),
        footprint_acres: 10.0,
        change_area_m2: 1000.0,
        intensity_score: 60,
        date_range: "Unknown".into(),
        water_stress_normalized: 0.5,
        center,
        geometry: Geometry::Polygon(vec![vec![
            [center[0] - 0.01, center[1] - 0.01],
            [center[0] + 0.01, center[1] - 0.01],
            [center[0] + 0.01, center[1] + 0.01],
            [center[0] - 0.01, center[1] - 0.01],
        ]]),
    }
}

fn controller(factory: &RecordingFactory) -> MapController<RecordingFactory> {
    MapController::new(factory.clone(), Some("pk.test".into()), None)
}

fn snapshot<'a>(projects: &'a [Project], selected: Option<&'a Project>) -> MapSnapshot<'a> {
    MapSnapshot {
        projects,
        overlays: OverlaySettings::default(),
        selected,
    }
}

fn mount(map: &mut MapController<RecordingFactory>) -> ReadyTicket {
    match map.mount().unwrap() {
        MountOutcome::Initializing(ticket) => ticket,
        other => panic!("expected Initializing, got {other:?}"),
    }
}

// ===========================================================================
// Degraded mode
// ===========================================================================

#[test]
fn missing_credential_never_leaves_uninitialized() {
    let factory = RecordingFactory::new();
    let mut map = MapController::new(factory.clone(), None, None);

    assert_eq!(map.mount().unwrap(), MountOutcome::Unavailable);
    assert_eq!(map.phase(), MapPhase::Uninitialized);
    assert_eq!(map.status(), MapStatus::Unavailable);
    assert_eq!(factory.created(), 0);

    let projects = vec![project("a", [-77.5, 39.0])];
    assert!(!map.sync_projects(&projects).unwrap());
    assert!(!map.sync_overlays(OverlaySettings::default()).unwrap());
    assert!(!map.follow(projects.first()));
    assert_eq!(map.handle_input(&MapInput::PointerEnter { layer_id: CONSTRUCTION_FILL.into() }), None);
}

#[test]
fn blank_credential_counts_as_missing() {
    let map = MapController::new(RecordingFactory::new(), Some("   ".into()), None);
    assert_eq!(map.status(), MapStatus::Unavailable);
}

// ===========================================================================
// Initialization
// ===========================================================================

#[test]
fn operations_before_ready_are_no_ops() {
    let factory = RecordingFactory::new();
    let mut map = controller(&factory);
    let projects = vec![project("a", [-77.5, 39.0])];

    mount(&mut map);
    assert_eq!(map.phase(), MapPhase::Initializing);
    assert_eq!(map.status(), MapStatus::Pending);

    assert!(!map.sync_projects(&projects).unwrap());
    assert!(!map.sync_overlays(OverlaySettings::default()).unwrap());
    assert!(!map.follow(projects.first()));
    assert!(!map.fly_home());
    assert!(factory.latest().calls.is_empty());
}

#[test]
fn ready_installs_layers_and_syncs_current_state() {
    let factory = RecordingFactory::new();
    let mut map = controller(&factory);
    let projects = vec![project("a", [-77.5, 39.0]), project("b", [-77.3, 38.8])];
    let overlays = OverlaySettings {
        show_construction: false,
        show_water_stress: true,
        water_stress_opacity: 40,
    };

    let ticket = mount(&mut map);
    let applied = map
        .on_ready(
            ticket,
            MapSnapshot {
                projects: &projects,
                overlays,
                selected: Some(&projects[1]),
            },
        )
        .unwrap();

    assert!(applied);
    assert_eq!(map.phase(), MapPhase::Loaded);
    assert_eq!(map.status(), MapStatus::Ready);

    let surface = factory.latest();
    assert!(surface.sources.contains_key(PROJECT_SOURCE));
    assert!(surface.sources.contains_key(WATER_STRESS_FALLBACK_SOURCE));
    assert!(surface.layer(CONSTRUCTION_FILL).is_some());
    assert!(surface.layer(CONSTRUCTION_OUTLINE).is_some());
    assert!(surface.layer(WATER_STRESS_LAYER).is_some());

    let bound: Vec<InputKind> = surface.bindings.iter().map(|b| b.kind).collect();
    assert_eq!(bound, vec![InputKind::Click, InputKind::PointerEnter, InputKind::PointerLeave]);
    assert!(surface.bindings.iter().all(|b| b.layer_id == CONSTRUCTION_FILL));

    assert_eq!(surface.feature_count(PROJECT_SOURCE), 2);
    assert_eq!(surface.layout_value(CONSTRUCTION_FILL, "visibility"), Some(&json!("none")));
    assert_eq!(surface.layout_value(CONSTRUCTION_OUTLINE, "visibility"), Some(&json!("none")));
    assert_eq!(surface.layout_value(WATER_STRESS_LAYER, "visibility"), Some(&json!("visible")));
    assert_eq!(surface.paint_value(WATER_STRESS_LAYER, "fill-opacity"), Some(&json!(0.4)));

    assert_eq!(surface.camera_moves.len(), 1);
    assert_eq!(surface.camera_moves[0].center, [-77.3, 38.8]);
    assert_eq!(surface.camera_moves[0].zoom, FOCUS_ZOOM);
}

#[test]
fn tile_url_selects_raster_overlay() {
    let factory = RecordingFactory::new();
    let mut map = MapController::new(
        factory.clone(),
        Some("pk.test".into()),
        Some("https://tiles.example.com/{z}/{x}/{y}.png".into()),
    );
    let ticket = mount(&mut map);
    map.on_ready(ticket, snapshot(&[], None)).unwrap();

    let surface = factory.latest();
    assert!(surface.sources.contains_key(WATER_STRESS_RASTER_SOURCE));
    assert!(!surface.sources.contains_key(WATER_STRESS_FALLBACK_SOURCE));
    assert_eq!(surface.paint_value(WATER_STRESS_LAYER, "raster-opacity"), Some(&json!(0.55)));
    assert_eq!(surface.paint_value(WATER_STRESS_LAYER, "fill-opacity"), None);
}

#[test]
fn second_mount_is_rejected_while_mounted() {
    let factory = RecordingFactory::new();
    let mut map = controller(&factory);
    mount(&mut map);
    assert_eq!(map.mount().unwrap(), MountOutcome::AlreadyMounted);
    assert_eq!(factory.created(), 1);
}

#[test]
fn failed_creation_stays_uninitialized() {
    let factory = RecordingFactory::new();
    factory.set_fail_create(true);
    let mut map = controller(&factory);

    assert!(map.mount().is_err());
    assert_eq!(map.phase(), MapPhase::Uninitialized);

    factory.set_fail_create(false);
    mount(&mut map);
    assert_eq!(map.phase(), MapPhase::Initializing);
}

// ===========================================================================
// Data sync
// ===========================================================================

#[test]
fn syncing_same_collection_twice_is_idempotent() {
    let factory = RecordingFactory::new();
    let mut map = controller(&factory);
    let projects = vec![project("a", [-77.5, 39.0]), project("b", [-77.3, 38.8])];
    let ticket = mount(&mut map);
    map.on_ready(ticket, snapshot(&projects, None)).unwrap();
    let first = factory.latest().source_data(PROJECT_SOURCE).cloned();

    assert!(map.sync_projects(&projects).unwrap());
    assert!(map.sync_projects(&projects).unwrap());

    let surface = factory.latest();
    assert_eq!(surface.source_data(PROJECT_SOURCE).cloned(), first);
    assert_eq!(surface.feature_count(PROJECT_SOURCE), 2);
    assert_eq!(surface.count_calls("add_source"), 2);
}

#[test]
fn sync_replaces_rather_than_appends() {
    let factory = RecordingFactory::new();
    let mut map = controller(&factory);
    let ticket = mount(&mut map);
    map.on_ready(ticket, snapshot(&[project("a", [-77.5, 39.0])], None)).unwrap();

    map.sync_projects(&[project("b", [-77.3, 38.8])]).unwrap();

    let surface = factory.latest();
    let data = surface.source_data(PROJECT_SOURCE).unwrap();
    assert_eq!(surface.feature_count(PROJECT_SOURCE), 1);
    assert_eq!(data["features"][0]["properties"]["project_id"], "b");
}

// ===========================================================================
// Visibility / opacity
// ===========================================================================

#[test]
fn overlay_updates_wait_for_style() {
    let factory = RecordingFactory::new();
    let mut map = controller(&factory);
    let ticket = mount(&mut map);
    map.on_ready(ticket, snapshot(&[], None)).unwrap();

    factory.set_style_loaded(false);
    let hidden = OverlaySettings {
        show_water_stress: false,
        ..OverlaySettings::default()
    };
    assert!(!map.sync_overlays(hidden).unwrap());
    assert_eq!(
        factory.latest().layout_value(WATER_STRESS_LAYER, "visibility"),
        Some(&json!("visible"))
    );

    factory.set_style_loaded(true);
    let later = OverlaySettings {
        water_stress_opacity: 80,
        ..hidden
    };
    assert!(map.sync_overlays(later).unwrap());
    let surface = factory.latest();
    assert_eq!(surface.layout_value(WATER_STRESS_LAYER, "visibility"), Some(&json!("none")));
    assert_eq!(surface.paint_value(WATER_STRESS_LAYER, "fill-opacity"), Some(&json!(0.8)));
}

#[test]
fn hidden_layers_stay_hidden_when_style_streams_at_ready() {
    let factory = RecordingFactory::new();
    let mut map = controller(&factory);
    let ticket = mount(&mut map);
    factory.set_style_loaded(false);

    let hidden = OverlaySettings {
        show_construction: false,
        show_water_stress: false,
        ..OverlaySettings::default()
    };
    let snap = MapSnapshot {
        projects: &[],
        overlays: hidden,
        selected: None,
    };
    assert!(map.on_ready(ticket, snap).unwrap());

    let surface = factory.latest();
    assert_eq!(surface.count_calls("set_layout_property"), 0);
    for layer in [CONSTRUCTION_FILL, CONSTRUCTION_OUTLINE, WATER_STRESS_LAYER] {
        assert_eq!(surface.layout_value(layer, "visibility"), Some(&json!("none")), "{layer}");
    }
}

#[test]
fn opacity_is_clamped_to_slider_range() {
    assert_eq!(OverlaySettings::clamp_opacity(0), 10);
    assert_eq!(OverlaySettings::clamp_opacity(55), 55);
    assert_eq!(OverlaySettings::clamp_opacity(250), 100);
}

// ===========================================================================
// Camera
// ===========================================================================

#[test]
fn cleared_selection_does_not_move_camera() {
    let factory = RecordingFactory::new();
    let mut map = controller(&factory);
    let projects = vec![project("a", [-77.5, 39.0])];
    let ticket = mount(&mut map);
    map.on_ready(ticket, snapshot(&projects, None)).unwrap();

    assert!(!map.follow(None));
    assert!(factory.latest().camera_moves.is_empty());

    assert!(map.follow(projects.first()));
    let moves = factory.latest().camera_moves;
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].speed, Some(0.8));
}

#[test]
fn fly_home_returns_to_region_view() {
    let factory = RecordingFactory::new();
    let mut map = controller(&factory);
    let ticket = mount(&mut map);
    map.on_ready(ticket, snapshot(&[], None)).unwrap();

    assert!(map.fly_home());
    let moves = factory.latest().camera_moves;
    assert_eq!(moves[0].center, [-77.44, 38.92]);
    assert_eq!(moves[0].zoom, 8.9);
}

// ===========================================================================
// Input
// ===========================================================================

#[test]
fn click_selects_and_hover_changes_cursor() {
    let factory = RecordingFactory::new();
    let mut map = controller(&factory);
    let ticket = mount(&mut map);
    map.on_ready(ticket, snapshot(&[], None)).unwrap();

    let clicked = map.handle_input(&MapInput::Click {
        layer_id: CONSTRUCTION_FILL.into(),
        features: vec![json!({ "project_id": "nova-002", "name": "x" }), json!({ "project_id": "nova-001" })],
    });
    assert_eq!(clicked.as_deref(), Some("nova-002"));

    let empty = map.handle_input(&MapInput::Click {
        layer_id: CONSTRUCTION_FILL.into(),
        features: vec![],
    });
    assert_eq!(empty, None);

    map.handle_input(&MapInput::PointerEnter { layer_id: CONSTRUCTION_FILL.into() });
    assert_eq!(factory.latest().cursor, Some(Cursor::Pointer));
    map.handle_input(&MapInput::PointerLeave { layer_id: CONSTRUCTION_FILL.into() });
    assert_eq!(factory.latest().cursor, Some(Cursor::Default));
}

#[test]
fn clicks_on_other_layers_are_ignored() {
    let factory = RecordingFactory::new();
    let mut map = controller(&factory);
    let ticket = mount(&mut map);
    map.on_ready(ticket, snapshot(&[], None)).unwrap();

    let clicked = map.handle_input(&MapInput::Click {
        layer_id: WATER_STRESS_LAYER.into(),
        features: vec![json!({ "project_id": "nova-001" })],
    });
    assert_eq!(clicked, None);
}

// ===========================================================================
// Disposal
// ===========================================================================

#[test]
fn ready_after_dispose_is_a_no_op() {
    let factory = RecordingFactory::new();
    let mut map = controller(&factory);
    let ticket = mount(&mut map);

    map.dispose();
    assert_eq!(map.phase(), MapPhase::Uninitialized);
    assert!(factory.latest().removed);

    // Would panic inside the recording surface if it touched the removed surface.
    assert!(!map.on_ready(ticket, snapshot(&[], None)).unwrap());
    assert_eq!(map.phase(), MapPhase::Uninitialized);
}

#[test]
fn stale_ticket_is_ignored_after_remount() {
    let factory = RecordingFactory::new();
    let mut map = controller(&factory);
    let old = mount(&mut map);
    map.dispose();
    let fresh = mount(&mut map);
    assert_ne!(old, fresh);

    assert!(!map.on_ready(old, snapshot(&[], None)).unwrap());
    assert_eq!(map.phase(), MapPhase::Initializing);
    assert_eq!(map.pending_ticket(), Some(fresh));

    assert!(map.on_ready(fresh, snapshot(&[], None)).unwrap());
    assert_eq!(factory.created(), 2);
    assert!(factory.surface(0).removed);
    assert!(!factory.surface(1).removed);
}

#[test]
fn dispose_after_load_releases_surface() {
    let factory = RecordingFactory::new();
    let mut map = controller(&factory);
    let ticket = mount(&mut map);
    map.on_ready(ticket, snapshot(&[], None)).unwrap();

    map.dispose();
    map.dispose();

    assert_eq!(factory.latest().count_calls("remove"), 1);
    assert!(!map.sync_projects(&[]).unwrap());
}
