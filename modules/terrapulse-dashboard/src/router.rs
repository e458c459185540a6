use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use terrapulse_client::DataGateway;
use terrapulse_engine::Router;
use terrapulse_map::{MapController, MapError, MountOutcome, SurfaceFactory};

use crate::demo::STEPS;
use crate::events::{DashboardEvent, FetchKind};
use crate::state::AppState;

/// Everything the router touches outside of `AppState`.
pub struct DashboardDeps<G, F: SurfaceFactory> {
    pub gateway: G,
    pub map: MapController<F>,
}

/// Side effects for each event: remote fetches, map sync, demo expansion.
///
/// Fetch failures become `FetchFailed` events. Map errors are logged and
/// swallowed; the map never takes the rest of the dashboard down with it.
pub struct DashboardRouter;

impl DashboardRouter {
    async fn fetch_projects<G: DataGateway>(gateway: &G) -> DashboardEvent {
        match gateway.list_projects().await {
            Ok(projects) => DashboardEvent::ProjectsLoaded { projects },
            Err(e) => failed(FetchKind::Projects, e),
        }
    }

    async fn fetch_meta<G: DataGateway>(gateway: &G) -> DashboardEvent {
        match gateway.get_meta().await {
            Ok(meta) => DashboardEvent::MetaLoaded { meta },
            Err(e) => failed(FetchKind::Meta, e),
        }
    }

    async fn fetch_counties<G: DataGateway>(gateway: &G, state: &AppState) -> DashboardEvent {
        let params = state.params;
        match gateway.get_county_summary(params).await {
            Ok(counties) => DashboardEvent::CountySummaryLoaded { params, counties },
            Err(e) => failed(FetchKind::CountySummary, e),
        }
    }
}

fn failed(kind: FetchKind, error: impl std::fmt::Display) -> DashboardEvent {
    warn!(%kind, error = %error, "Fetch failed");
    DashboardEvent::FetchFailed {
        kind,
        message: error.to_string(),
    }
}

fn log_map_error(op: &str, result: std::result::Result<bool, MapError>) {
    if let Err(e) = result {
        warn!(op, error = %e, "Map update failed");
    }
}

#[async_trait]
impl<G, F> Router<DashboardEvent, AppState, DashboardDeps<G, F>> for DashboardRouter
where
    G: DataGateway,
    F: SurfaceFactory,
{
    async fn route(
        &self,
        event: &DashboardEvent,
        state: &AppState,
        deps: &mut DashboardDeps<G, F>,
    ) -> Result<Vec<DashboardEvent>> {
        match event {
            DashboardEvent::Started => {
                info!("Dashboard starting");
                Ok(vec![
                    Self::fetch_projects(&deps.gateway).await,
                    Self::fetch_meta(&deps.gateway).await,
                    Self::fetch_counties(&deps.gateway, state).await,
                ])
            }

            DashboardEvent::ProjectsRequested => Ok(vec![Self::fetch_projects(&deps.gateway).await]),

            DashboardEvent::ProjectsLoaded { projects } => {
                log_map_error("sync_projects", deps.map.sync_projects(&state.projects));
                // First successful load selects the first project.
                if state.project_loads == 1 && state.selected_project_id.is_none() {
                    if let Some(first) = projects.first() {
                        return Ok(vec![DashboardEvent::ProjectSelected {
                            project_id: Some(first.project_id.clone()),
                        }]);
                    }
                }
                Ok(vec![])
            }

            DashboardEvent::ProjectSelected { project_id } => {
                // Only follow a selection the reducer actually accepted.
                if project_id.is_some() && state.selected_project_id == *project_id {
                    deps.map.follow(state.selected_project());
                }
                Ok(vec![])
            }

            DashboardEvent::ConstructionLayerToggled { .. }
            | DashboardEvent::WaterStressLayerToggled { .. }
            | DashboardEvent::WaterStressOpacityChanged { .. } => {
                log_map_error("sync_overlays", deps.map.sync_overlays(state.overlays));
                Ok(vec![])
            }

            DashboardEvent::SizeChanged { .. } | DashboardEvent::CoolingTypeChanged { .. } => {
                Ok(vec![Self::fetch_counties(&deps.gateway, state).await])
            }

            DashboardEvent::CameraHomeRequested => {
                deps.map.fly_home();
                Ok(vec![])
            }

            DashboardEvent::DemoStepRequested { .. } => {
                let step = STEPS[state.demo_step];
                info!(step = state.demo_step, title = step.title, "Demo step");
                Ok(step.events(state))
            }

            DashboardEvent::MapMounted => {
                match deps.map.mount() {
                    Ok(MountOutcome::Initializing(ticket)) => {
                        info!(ticket = ticket.0, "Map mount requested");
                    }
                    Ok(MountOutcome::AlreadyMounted) => {}
                    Ok(MountOutcome::Unavailable) => {
                        warn!("Map unavailable: no access token configured");
                    }
                    Err(e) => warn!(error = %e, "Map surface creation failed"),
                }
                Ok(vec![])
            }

            DashboardEvent::MapReady { ticket } => {
                log_map_error("on_ready", deps.map.on_ready(*ticket, state.map_snapshot()));
                Ok(vec![])
            }

            DashboardEvent::MapInputReceived { input } => Ok(deps
                .map
                .handle_input(input)
                .map(|id| DashboardEvent::ProjectSelected {
                    project_id: Some(id),
                })
                .into_iter()
                .collect()),

            DashboardEvent::MapDisposed => {
                deps.map.dispose();
                Ok(vec![])
            }

            DashboardEvent::MetaLoaded { .. }
            | DashboardEvent::CountySummaryLoaded { .. }
            | DashboardEvent::FetchFailed { .. }
            | DashboardEvent::AssumeDataCenterToggled { .. } => Ok(vec![]),
        }
    }
}
