//! HTTP surface for TerraPulse: project listings, scenario scores and
//! county projections over an in-memory project set.

pub mod data;
pub mod routes;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use terrapulse_common::{DataSource, Project};

pub struct ApiState {
    pub projects: Vec<Project>,
    pub data_source: DataSource,
    /// Where an operator should drop a GeoJSON export, reported by `/meta`.
    pub geojson_path: String,
    index: HashMap<String, usize>,
}

impl ApiState {
    pub fn new(projects: Vec<Project>, data_source: DataSource, geojson_path: impl Into<String>) -> Self {
        let index = projects
            .iter()
            .enumerate()
            .map(|(i, p)| (p.project_id.clone(), i))
            .collect();
        Self {
            projects,
            data_source,
            geojson_path: geojson_path.into(),
            index,
        }
    }

    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.index.get(project_id).map(|&i| &self.projects[i])
    }
}

pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/projects", get(routes::list_projects))
        .route("/projects/{id}", get(routes::get_project))
        .route("/score", post(routes::score_project))
        .route("/meta", get(routes::meta))
        .route("/counties/summary", get(routes::county_summary))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
