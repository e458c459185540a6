//! Guided walkthrough. Each step emits the same events a user would, and
//! only depends on the state it runs against, never on which steps ran
//! before it.

use terrapulse_common::{CoolingType, Project, SizeMw};

use crate::events::DashboardEvent;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoAction {
    /// Both layers off, camera back to the home view.
    ShowRegion,
    ShowConstruction,
    ShowWaterStress,
    SelectHighestIntensity,
    AssumeDataCenter,
    Scenario { size_mw: SizeMw, cooling_type: CoolingType },
    Cooling(CoolingType),
    Conclude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoStep {
    pub title: &'static str,
    pub action: DemoAction,
}

pub const STEPS: [DemoStep; 10] = [
    DemoStep {
        title: "1) Show Northern Virginia map",
        action: DemoAction::ShowRegion,
    },
    DemoStep {
        title: "2) Toggle construction heatmap",
        action: DemoAction::ShowConstruction,
    },
    DemoStep {
        title: "3) Explain rapid expansion",
        action: DemoAction::ShowConstruction,
    },
    DemoStep {
        title: "4) Overlay water stress",
        action: DemoAction::ShowWaterStress,
    },
    DemoStep {
        title: "5) Click major cluster",
        action: DemoAction::SelectHighestIntensity,
    },
    DemoStep {
        title: "6) Toggle Assume Data Center",
        action: DemoAction::AssumeDataCenter,
    },
    DemoStep {
        title: "7) Switch Air to Evaporative",
        action: DemoAction::Scenario {
            size_mw: SizeMw::Hyperscale,
            cooling_type: CoolingType::Air,
        },
    },
    DemoStep {
        title: "8) Show water demand jump",
        action: DemoAction::Cooling(CoolingType::Evaporative),
    },
    DemoStep {
        title: "9) Show impact score increase",
        action: DemoAction::Cooling(CoolingType::Evaporative),
    },
    DemoStep {
        title: "10) Civic planning conclusion",
        action: DemoAction::Conclude,
    },
];

/// Clamp a requested step into `0..STEPS.len()`.
pub fn clamp_step(index: i64) -> usize {
    index.clamp(0, STEPS.len() as i64 - 1) as usize
}

/// Highest intensity score; ties go to the smallest `project_id`.
pub fn highest_intensity(projects: &[Project]) -> Option<&Project> {
    projects.iter().min_by(|a, b| {
        b.intensity_score
            .cmp(&a.intensity_score)
            .then_with(|| a.project_id.cmp(&b.project_id))
    })
}

impl DemoStep {
    pub fn events(&self, state: &AppState) -> Vec<DashboardEvent> {
        match self.action {
            DemoAction::ShowRegion => vec![
                DashboardEvent::ConstructionLayerToggled { visible: false },
                DashboardEvent::WaterStressLayerToggled { visible: false },
                DashboardEvent::CameraHomeRequested,
            ],
            DemoAction::ShowConstruction => {
                vec![DashboardEvent::ConstructionLayerToggled { visible: true }]
            }
            DemoAction::ShowWaterStress => {
                vec![DashboardEvent::WaterStressLayerToggled { visible: true }]
            }
            // No projects loaded: nothing to select.
            DemoAction::SelectHighestIntensity => highest_intensity(&state.projects)
                .map(|top| DashboardEvent::ProjectSelected {
                    project_id: Some(top.project_id.clone()),
                })
                .into_iter()
                .collect(),
            DemoAction::AssumeDataCenter => {
                vec![DashboardEvent::AssumeDataCenterToggled { enabled: true }]
            }
            DemoAction::Scenario {
                size_mw,
                cooling_type,
            } => vec![
                DashboardEvent::SizeChanged { size_mw },
                DashboardEvent::CoolingTypeChanged { cooling_type },
            ],
            DemoAction::Cooling(cooling_type) => {
                vec![DashboardEvent::CoolingTypeChanged { cooling_type }]
            }
            DemoAction::Conclude => Vec::new(),
        }
    }
}
