use anyhow::Result;

use terrapulse_client::DataGateway;
use terrapulse_engine::{Engine, EventJournal, TracingJournal};
use terrapulse_map::{MapController, MapInput, MapStatus, ReadyTicket, SurfaceFactory};

use crate::demo::STEPS;
use crate::events::DashboardEvent;
use crate::panel::ScoringPanel;
use crate::reducer::DashboardReducer;
use crate::router::{DashboardDeps, DashboardRouter};
use crate::state::AppState;

type DashboardEngine<G, F, J> =
    Engine<DashboardEvent, AppState, DashboardDeps<G, F>, DashboardReducer, DashboardRouter, J>;

/// Owns the state, the gateway and the map controller, and feeds every
/// change through one ordered dispatch loop.
pub struct Dashboard<G, F, J = TracingJournal>
where
    G: DataGateway,
    F: SurfaceFactory,
    J: EventJournal,
{
    engine: DashboardEngine<G, F, J>,
    state: AppState,
    deps: DashboardDeps<G, F>,
}

impl<G, F> Dashboard<G, F>
where
    G: DataGateway,
    F: SurfaceFactory,
{
    pub fn new(gateway: G, map: MapController<F>) -> Self {
        Self::with_journal(gateway, map, TracingJournal::new())
    }
}

impl<G, F, J> Dashboard<G, F, J>
where
    G: DataGateway,
    F: SurfaceFactory,
    J: EventJournal,
{
    pub fn with_journal(gateway: G, map: MapController<F>, journal: J) -> Self {
        Self {
            engine: Engine::new(DashboardReducer, DashboardRouter, journal),
            state: AppState::default(),
            deps: DashboardDeps { gateway, map },
        }
    }

    pub async fn dispatch(&mut self, event: DashboardEvent) -> Result<()> {
        self.engine
            .dispatch(event, &mut self.state, &mut self.deps)
            .await
    }

    /// Mount the map, then load projects, metadata and county summary.
    pub async fn start(&mut self) -> Result<()> {
        self.dispatch(DashboardEvent::MapMounted).await?;
        self.dispatch(DashboardEvent::Started).await
    }

    pub async fn refresh_projects(&mut self) -> Result<()> {
        self.dispatch(DashboardEvent::ProjectsRequested).await
    }

    pub async fn map_ready(&mut self, ticket: ReadyTicket) -> Result<()> {
        self.dispatch(DashboardEvent::MapReady { ticket }).await
    }

    pub async fn map_input(&mut self, input: MapInput) -> Result<()> {
        self.dispatch(DashboardEvent::MapInputReceived { input }).await
    }

    pub async fn select(&mut self, project_id: Option<&str>) -> Result<()> {
        self.dispatch(DashboardEvent::ProjectSelected {
            project_id: project_id.map(str::to_string),
        })
        .await
    }

    /// Run demo step `index`, clamped into range.
    pub async fn go_to(&mut self, index: i64) -> Result<()> {
        self.dispatch(DashboardEvent::DemoStepRequested { index }).await
    }

    /// Advance the demo. No-op on the last step.
    pub async fn next(&mut self) -> Result<()> {
        if self.state.demo_step + 1 >= STEPS.len() {
            return Ok(());
        }
        self.go_to(self.state.demo_step as i64 + 1).await
    }

    /// Step the demo back. No-op on the first step.
    pub async fn prev(&mut self) -> Result<()> {
        if self.state.demo_step == 0 {
            return Ok(());
        }
        self.go_to(self.state.demo_step as i64 - 1).await
    }

    pub async fn shutdown(&mut self) -> Result<()> {
        self.dispatch(DashboardEvent::MapDisposed).await
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn scoring_panel(&self) -> ScoringPanel<'_> {
        self.state.scoring_panel()
    }

    pub fn gateway(&self) -> &G {
        &self.deps.gateway
    }

    pub fn map(&self) -> &MapController<F> {
        &self.deps.map
    }

    pub fn map_status(&self) -> MapStatus {
        self.deps.map.status()
    }

    pub fn pending_map_ticket(&self) -> Option<ReadyTicket> {
        self.deps.map.pending_ticket()
    }

    pub fn demo_title(&self) -> &'static str {
        STEPS[self.state.demo_step].title
    }

    pub fn journal(&self) -> &J {
        self.engine.journal()
    }
}
