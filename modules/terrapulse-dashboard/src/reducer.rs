use tracing::debug;

use terrapulse_engine::Reducer;
use terrapulse_map::OverlaySettings;

use crate::demo::clamp_step;
use crate::events::{DashboardEvent, FetchKind};
use crate::state::{AppState, DashboardError};

/// Pure state transitions. Map and fetch side effects live in the router.
pub struct DashboardReducer;

impl DashboardReducer {
    fn clear_error(state: &mut AppState, kind: FetchKind) {
        if state.error.as_ref().is_some_and(|e| e.kind() == kind) {
            state.error = None;
        }
    }
}

impl Reducer<DashboardEvent, AppState> for DashboardReducer {
    fn reduce(&self, state: &mut AppState, event: &DashboardEvent) {
        match event {
            DashboardEvent::ProjectsLoaded { projects } => {
                state.projects = projects.clone();
                state.project_loads += 1;
                // A selection that vanished from the new collection is cleared.
                if state.selected_project().is_none() {
                    state.selected_project_id = None;
                }
                Self::clear_error(state, FetchKind::Projects);
            }

            DashboardEvent::MetaLoaded { meta } => {
                state.meta = Some(meta.clone());
                Self::clear_error(state, FetchKind::Meta);
            }

            DashboardEvent::CountySummaryLoaded { params, counties } => {
                if *params != state.params {
                    debug!(?params, current = ?state.params, "Dropping stale county summary");
                    return;
                }
                state.county_summary = counties.clone();
                Self::clear_error(state, FetchKind::CountySummary);
            }

            DashboardEvent::FetchFailed { kind, message } => {
                state.error = Some(DashboardError::DataFetch {
                    kind: *kind,
                    detail: message.clone(),
                });
            }

            DashboardEvent::ProjectSelected { project_id } => match project_id {
                None => state.selected_project_id = None,
                Some(id) if state.project(id).is_some() => {
                    state.selected_project_id = Some(id.clone());
                }
                Some(id) => debug!(project_id = %id, "Ignoring selection of unknown project"),
            },

            DashboardEvent::ConstructionLayerToggled { visible } => {
                state.overlays.show_construction = *visible;
            }
            DashboardEvent::WaterStressLayerToggled { visible } => {
                state.overlays.show_water_stress = *visible;
            }
            DashboardEvent::WaterStressOpacityChanged { percent } => {
                state.overlays.water_stress_opacity = OverlaySettings::clamp_opacity(*percent);
            }
            DashboardEvent::AssumeDataCenterToggled { enabled } => {
                state.assume_data_center = *enabled;
            }
            DashboardEvent::SizeChanged { size_mw } => {
                state.params.size_mw = *size_mw;
            }
            DashboardEvent::CoolingTypeChanged { cooling_type } => {
                state.params.cooling_type = *cooling_type;
            }
            DashboardEvent::DemoStepRequested { index } => {
                state.demo_step = clamp_step(*index);
            }

            // Side-effect-only events
            DashboardEvent::Started
            | DashboardEvent::ProjectsRequested
            | DashboardEvent::CameraHomeRequested
            | DashboardEvent::MapMounted
            | DashboardEvent::MapReady { .. }
            | DashboardEvent::MapInputReceived { .. }
            | DashboardEvent::MapDisposed => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrapulse_common::{
        CoolingType, CountySummary, Geometry, Project, ScenarioParameters, SizeMw, Tier,
    };

    fn project(id: &str) -> Project {
        Project {
            project_id: id.into(),
            name: id.into(),
            county: "Fairfax".into(),
            footprint_acres: 1.0,
            change_area_m2: 1.0,
            intensity_score: 50,
            date_range: "Unknown".into(),
            water_stress_normalized: 0.4,
            center: [-77.3, 38.9],
            geometry: Geometry::Point([-77.3, 38.9]),
        }
    }

    fn loaded(ids: &[&str]) -> DashboardEvent {
        DashboardEvent::ProjectsLoaded {
            projects: ids.iter().map(|id| project(id)).collect(),
        }
    }

    #[test]
    fn refresh_clears_vanished_selection() {
        let mut state = AppState::default();
        DashboardReducer.reduce(&mut state, &loaded(&["a", "b"]));
        DashboardReducer.reduce(
            &mut state,
            &DashboardEvent::ProjectSelected {
                project_id: Some("b".into()),
            },
        );
        assert_eq!(state.selected_project_id.as_deref(), Some("b"));

        DashboardReducer.reduce(&mut state, &loaded(&["a", "b", "c"]));
        assert_eq!(state.selected_project_id.as_deref(), Some("b"));

        DashboardReducer.reduce(&mut state, &loaded(&["a"]));
        assert_eq!(state.selected_project_id, None);
        assert_eq!(state.project_loads, 3);
    }

    #[test]
    fn unknown_selection_keeps_current() {
        let mut state = AppState::default();
        DashboardReducer.reduce(&mut state, &loaded(&["a"]));
        DashboardReducer.reduce(
            &mut state,
            &DashboardEvent::ProjectSelected {
                project_id: Some("a".into()),
            },
        );
        DashboardReducer.reduce(
            &mut state,
            &DashboardEvent::ProjectSelected {
                project_id: Some("zzz".into()),
            },
        );
        assert_eq!(state.selected_project_id.as_deref(), Some("a"));
    }

    #[test]
    fn opacity_is_clamped() {
        let mut state = AppState::default();
        DashboardReducer.reduce(&mut state, &DashboardEvent::WaterStressOpacityChanged { percent: 0 });
        assert_eq!(state.overlays.water_stress_opacity, 10);
        DashboardReducer.reduce(&mut state, &DashboardEvent::WaterStressOpacityChanged { percent: 250 });
        assert_eq!(state.overlays.water_stress_opacity, 100);
    }

    #[test]
    fn stale_county_summary_is_dropped() {
        let mut state = AppState::default();
        state.params = ScenarioParameters {
            size_mw: SizeMw::Hyperscale,
            cooling_type: CoolingType::Air,
        };
        let county = CountySummary {
            county: "Loudoun".into(),
            project_count: 1,
            total_change_area_m2: 1.0,
            avg_stress: 0.4,
            avg_intensity: 50.0,
            projected_annual_water_liters: 306_600_000.0,
            projected_impact_score: 12.5,
            projected_tier: Tier::Low,
        };
        DashboardReducer.reduce(
            &mut state,
            &DashboardEvent::CountySummaryLoaded {
                params: ScenarioParameters::default(),
                counties: vec![county.clone()],
            },
        );
        assert!(state.county_summary.is_empty());

        let current = DashboardEvent::CountySummaryLoaded {
            params: state.params,
            counties: vec![county.clone()],
        };
        DashboardReducer.reduce(&mut state, &current);
        assert_eq!(state.county_summary, vec![county]);
    }

    #[test]
    fn success_clears_matching_error_only() {
        let mut state = AppState::default();
        DashboardReducer.reduce(
            &mut state,
            &DashboardEvent::FetchFailed {
                kind: FetchKind::Projects,
                message: "timeout".into(),
            },
        );
        assert_eq!(
            state.error.as_ref().map(ToString::to_string).as_deref(),
            Some("Could not load projects from API.")
        );

        DashboardReducer.reduce(
            &mut state,
            &DashboardEvent::CountySummaryLoaded {
                params: ScenarioParameters::default(),
                counties: Vec::new(),
            },
        );
        assert!(state.error.is_some());

        DashboardReducer.reduce(&mut state, &loaded(&["a"]));
        assert!(state.error.is_none());
    }
}
