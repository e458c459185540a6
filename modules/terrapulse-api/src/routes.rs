use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use terrapulse_common::{ApiMeta, CoolingType, ScenarioParameters, SizeMw};
use terrapulse_scoring::{county_summaries, score};

use crate::ApiState;

// --- Request structs ---

#[derive(Deserialize)]
pub struct ScoreRequest {
    project_id: String,
    size_mw: u32,
    cooling_type: CoolingType,
}

#[derive(Deserialize)]
pub struct CountyQuery {
    size_mw: Option<u32>,
    cooling_type: Option<CoolingType>,
}

// --- Helpers ---

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}

fn project_not_found() -> Response {
    detail(StatusCode::NOT_FOUND, "Project not found")
}

fn size_from(mw: u32) -> Result<SizeMw, Response> {
    if mw == 0 {
        return Err(detail(StatusCode::BAD_REQUEST, "size_mw must be greater than 0"));
    }
    SizeMw::try_from(mw).map_err(|e| detail(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
}

// --- Handlers ---

pub async fn health(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "data_source": state.data_source,
        "project_count": state.projects.len(),
    }))
}

pub async fn list_projects(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    Json(state.projects.clone())
}

pub async fn get_project(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Response {
    match state.project(&id) {
        Some(project) => Json(project.clone()).into_response(),
        None => project_not_found(),
    }
}

pub async fn score_project(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<ScoreRequest>,
) -> Response {
    let size_mw = match size_from(req.size_mw) {
        Ok(size) => size,
        Err(resp) => return resp,
    };
    let Some(project) = state.project(&req.project_id) else {
        return project_not_found();
    };

    let params = ScenarioParameters {
        size_mw,
        cooling_type: req.cooling_type,
    };
    let result = score(project, params);
    debug!(project_id = %project.project_id, ?params, impact = result.impact_score, "Scored project");
    Json(result).into_response()
}

pub async fn meta(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    Json(ApiMeta {
        data_source: state.data_source,
        project_count: state.projects.len(),
        expects_geojson_at: state.geojson_path.clone(),
    })
}

pub async fn county_summary(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<CountyQuery>,
) -> Response {
    let defaults = ScenarioParameters::default();
    let size_mw = match query.size_mw.map(size_from).transpose() {
        Ok(size) => size.unwrap_or(defaults.size_mw),
        Err(resp) => return resp,
    };
    let params = ScenarioParameters {
        size_mw,
        cooling_type: query.cooling_type.unwrap_or(defaults.cooling_type),
    };
    Json(county_summaries(&state.projects, params)).into_response()
}
