pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::{GatewayError, Result};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use terrapulse_common::{ApiMeta, CountySummary, Project, ScenarioParameters, ScoreResult};

// ---------------------------------------------------------------------------
// DataGateway: the remote data contract
// ---------------------------------------------------------------------------

/// Typed access to the TerraPulse API. Every call is a one-shot, idempotent
/// read (or a side-effect-free POST) that may fail with a [`GatewayError`].
#[async_trait]
pub trait DataGateway: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>>;

    async fn get_project(&self, project_id: &str) -> Result<Project>;

    async fn get_meta(&self) -> Result<ApiMeta>;

    async fn compute_score(&self, project_id: &str, params: ScenarioParameters) -> Result<ScoreResult>;

    async fn get_county_summary(&self, params: ScenarioParameters) -> Result<Vec<CountySummary>>;
}

// ---------------------------------------------------------------------------
// ApiClient: reqwest implementation
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ScoreRequest<'a> {
    project_id: &'a str,
    size_mw: u32,
    cooling_type: &'static str,
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");
        let resp = self.client.get(&url).send().await?;
        Self::read(resp).await
    }
}

#[async_trait]
impl DataGateway for ApiClient {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        let projects: Vec<Project> = self.get("/projects").await?;
        tracing::info!(count = projects.len(), "Fetched projects");
        Ok(projects)
    }

    async fn get_project(&self, project_id: &str) -> Result<Project> {
        self.get(&format!("/projects/{project_id}")).await
    }

    async fn get_meta(&self) -> Result<ApiMeta> {
        self.get("/meta").await
    }

    async fn compute_score(&self, project_id: &str, params: ScenarioParameters) -> Result<ScoreResult> {
        let url = format!("{}/score", self.base_url);
        let body = ScoreRequest {
            project_id,
            size_mw: params.size_mw.megawatts(),
            cooling_type: params.cooling_type.as_str(),
        };
        tracing::debug!(%url, project_id, size_mw = body.size_mw, cooling_type = body.cooling_type, "POST");
        let resp = self.client.post(&url).json(&body).send().await?;
        Self::read(resp).await
    }

    async fn get_county_summary(&self, params: ScenarioParameters) -> Result<Vec<CountySummary>> {
        let url = format!("{}/counties/summary", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("size_mw", params.size_mw.megawatts().to_string()),
                ("cooling_type", params.cooling_type.as_str().to_string()),
            ])
            .send()
            .await?;
        Self::read(resp).await
    }
}
