use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use terrapulse_api::{build_router, data::load_projects, ApiState};
use terrapulse_common::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("terrapulse=info".parse()?))
        .init();

    let config = Config::from_env()?;

    let (projects, data_source) = load_projects(Path::new(&config.projects_geojson));
    info!(count = projects.len(), %data_source, "Project data ready");

    let state = Arc::new(ApiState::new(projects, data_source, config.projects_geojson.clone()));
    let app = build_router(state);

    let addr = format!("{}:{}", config.api_host, config.api_port);
    info!("TerraPulse API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
