// In-memory DataGateway for tests.
//
// Canned responses are swappable after construction (projects can be
// replaced between dispatches to simulate a refetch) and each endpoint can be
// switched into a failing mode. Call counts are recorded for assertions.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use terrapulse_common::{ApiMeta, CountySummary, DataSource, Project, ScenarioParameters, ScoreResult};

use crate::{DataGateway, GatewayError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ListProjects,
    GetProject,
    GetMeta,
    ComputeScore,
    CountySummary,
}

#[derive(Default)]
struct MockState {
    projects: Vec<Project>,
    meta: Option<ApiMeta>,
    counties: HashMap<ScenarioParameters, Vec<CountySummary>>,
    scores: HashMap<(String, ScenarioParameters), ScoreResult>,
    failing: Vec<Endpoint>,
    calls: HashMap<Endpoint, usize>,
}

/// Builder pattern: `.with_projects()`, `.with_meta()`, `.with_counties()`,
/// `.with_score()`, `.failing()`.
pub struct MockGateway {
    state: Mutex<MockState>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState::default()),
        }
    }

    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        self.set_projects(projects);
        self
    }

    pub fn with_meta(self, meta: ApiMeta) -> Self {
        self.state.lock().unwrap().meta = Some(meta);
        self
    }

    pub fn with_counties(self, params: ScenarioParameters, counties: Vec<CountySummary>) -> Self {
        self.state.lock().unwrap().counties.insert(params, counties);
        self
    }

    pub fn with_score(self, project_id: &str, params: ScenarioParameters, score: ScoreResult) -> Self {
        self.state
            .lock()
            .unwrap()
            .scores
            .insert((project_id.to_string(), params), score);
        self
    }

    pub fn failing(self, endpoint: Endpoint) -> Self {
        self.set_failing(endpoint, true);
        self
    }

    pub fn set_projects(&self, projects: Vec<Project>) {
        self.state.lock().unwrap().projects = projects;
    }

    pub fn set_failing(&self, endpoint: Endpoint, failing: bool) {
        let mut state = self.state.lock().unwrap();
        state.failing.retain(|e| *e != endpoint);
        if failing {
            state.failing.push(endpoint);
        }
    }

    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(&endpoint)
            .copied()
            .unwrap_or(0)
    }

    fn enter(&self, endpoint: Endpoint) -> Result<std::sync::MutexGuard<'_, MockState>> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry(endpoint).or_default() += 1;
        if state.failing.contains(&endpoint) {
            return Err(GatewayError::Api {
                status: 503,
                message: format!("MockGateway: {endpoint:?} unavailable"),
            });
        }
        Ok(state)
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DataGateway for MockGateway {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.enter(Endpoint::ListProjects)?.projects.clone())
    }

    async fn get_project(&self, project_id: &str) -> Result<Project> {
        self.enter(Endpoint::GetProject)?
            .projects
            .iter()
            .find(|p| p.project_id == project_id)
            .cloned()
            .ok_or_else(|| GatewayError::Api {
                status: 404,
                message: "Project not found".into(),
            })
    }

    async fn get_meta(&self) -> Result<ApiMeta> {
        let state = self.enter(Endpoint::GetMeta)?;
        Ok(state.meta.clone().unwrap_or(ApiMeta {
            data_source: DataSource::Sample,
            project_count: state.projects.len(),
            expects_geojson_at: "data/projects.geojson".into(),
        }))
    }

    async fn compute_score(&self, project_id: &str, params: ScenarioParameters) -> Result<ScoreResult> {
        self.enter(Endpoint::ComputeScore)?
            .scores
            .get(&(project_id.to_string(), params))
            .cloned()
            .ok_or_else(|| GatewayError::Api {
                status: 404,
                message: format!("MockGateway: no score registered for {project_id}"),
            })
    }

    async fn get_county_summary(&self, params: ScenarioParameters) -> Result<Vec<CountySummary>> {
        Ok(self
            .enter(Endpoint::CountySummary)?
            .counties
            .get(&params)
            .cloned()
            .unwrap_or_default())
    }
}
