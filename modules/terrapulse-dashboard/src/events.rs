use serde::Serialize;

use terrapulse_common::{ApiMeta, CoolingType, CountySummary, Project, ScenarioParameters, SizeMw};
use terrapulse_engine::EventLike;
use terrapulse_map::{MapInput, ReadyTicket};

/// Which remote call a fetch result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchKind {
    Projects,
    Meta,
    CountySummary,
}

impl std::fmt::Display for FetchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchKind::Projects => write!(f, "projects"),
            FetchKind::Meta => write!(f, "API metadata"),
            FetchKind::CountySummary => write!(f, "county summary"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    // --- Session ---
    Started,
    ProjectsRequested,

    // --- Remote data ---
    ProjectsLoaded {
        projects: Vec<Project>,
    },
    MetaLoaded {
        meta: ApiMeta,
    },
    /// Tagged with the parameters it was requested for; applied only if they
    /// are still current.
    CountySummaryLoaded {
        params: ScenarioParameters,
        counties: Vec<CountySummary>,
    },
    FetchFailed {
        kind: FetchKind,
        message: String,
    },

    // --- User input ---
    ProjectSelected {
        project_id: Option<String>,
    },
    ConstructionLayerToggled {
        visible: bool,
    },
    WaterStressLayerToggled {
        visible: bool,
    },
    WaterStressOpacityChanged {
        percent: i64,
    },
    AssumeDataCenterToggled {
        enabled: bool,
    },
    SizeChanged {
        size_mw: SizeMw,
    },
    CoolingTypeChanged {
        cooling_type: CoolingType,
    },
    CameraHomeRequested,
    DemoStepRequested {
        index: i64,
    },

    // --- Map surface ---
    MapMounted,
    MapReady {
        ticket: ReadyTicket,
    },
    MapInputReceived {
        input: MapInput,
    },
    MapDisposed,
}

impl EventLike for DashboardEvent {
    fn event_type_str(&self) -> String {
        let name = match self {
            DashboardEvent::Started => "session:started",
            DashboardEvent::ProjectsRequested => "session:projects_requested",
            DashboardEvent::ProjectsLoaded { .. } => "data:projects_loaded",
            DashboardEvent::MetaLoaded { .. } => "data:meta_loaded",
            DashboardEvent::CountySummaryLoaded { .. } => "data:county_summary_loaded",
            DashboardEvent::FetchFailed { .. } => "data:fetch_failed",
            DashboardEvent::ProjectSelected { .. } => "input:project_selected",
            DashboardEvent::ConstructionLayerToggled { .. } => "input:construction_toggled",
            DashboardEvent::WaterStressLayerToggled { .. } => "input:water_stress_toggled",
            DashboardEvent::WaterStressOpacityChanged { .. } => "input:opacity_changed",
            DashboardEvent::AssumeDataCenterToggled { .. } => "input:assume_data_center_toggled",
            DashboardEvent::SizeChanged { .. } => "input:size_changed",
            DashboardEvent::CoolingTypeChanged { .. } => "input:cooling_changed",
            DashboardEvent::CameraHomeRequested => "input:camera_home",
            DashboardEvent::DemoStepRequested { .. } => "input:demo_step",
            DashboardEvent::MapMounted => "map:mounted",
            DashboardEvent::MapReady { .. } => "map:ready",
            DashboardEvent::MapInputReceived { .. } => "map:input",
            DashboardEvent::MapDisposed => "map:disposed",
        };
        name.to_string()
    }

    fn to_journal_payload(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
