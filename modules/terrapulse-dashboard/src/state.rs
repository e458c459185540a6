use serde::Serialize;
use thiserror::Error;

use terrapulse_common::{ApiMeta, CountySummary, Project, ScenarioParameters};
use terrapulse_map::{MapSnapshot, OverlaySettings};
use terrapulse_scoring::{compare_cooling, score};

use crate::events::FetchKind;
use crate::panel::ScoringPanel;

/// User-visible, non-blocking failure. Previously loaded data stays on screen.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum DashboardError {
    #[error("Could not load {kind} from API.")]
    DataFetch { kind: FetchKind, detail: String },
}

impl DashboardError {
    pub fn kind(&self) -> FetchKind {
        match self {
            DashboardError::DataFetch { kind, .. } => *kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub projects: Vec<Project>,
    /// Number of successful project loads so far.
    pub project_loads: u32,
    /// Always `None` or the id of a project in `projects`.
    pub selected_project_id: Option<String>,
    pub overlays: OverlaySettings,
    pub assume_data_center: bool,
    pub params: ScenarioParameters,
    pub county_summary: Vec<CountySummary>,
    pub meta: Option<ApiMeta>,
    pub error: Option<DashboardError>,
    pub demo_step: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            project_loads: 0,
            selected_project_id: None,
            overlays: OverlaySettings::default(),
            assume_data_center: true,
            params: ScenarioParameters::default(),
            county_summary: Vec::new(),
            meta: None,
            error: None,
            demo_step: 0,
        }
    }
}

impl AppState {
    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.project_id == project_id)
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.selected_project_id
            .as_deref()
            .and_then(|id| self.project(id))
    }

    /// Derived on every call; nothing score-related is cached in state.
    pub fn scoring_panel(&self) -> ScoringPanel<'_> {
        let Some(project) = self.selected_project() else {
            return ScoringPanel::NoSelection;
        };
        if !self.assume_data_center {
            return ScoringPanel::Disabled { project };
        }
        ScoringPanel::Ready {
            project,
            params: self.params,
            score: score(project, self.params),
            comparison: compare_cooling(project, self.params.size_mw, self.params.cooling_type),
        }
    }

    pub fn map_snapshot(&self) -> MapSnapshot<'_> {
        MapSnapshot {
            projects: &self.projects,
            overlays: self.overlays,
            selected: self.selected_project(),
        }
    }
}
