use std::env;

use crate::error::TerraPulseError;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_PROJECTS_GEOJSON: &str = "data/projects.geojson";

/// Application configuration loaded from environment variables.
/// Every value has a default or is optional; a missing map token puts the
/// dashboard in degraded (map-less) mode rather than failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    // Remote data
    pub api_base_url: String,

    // Map rendering
    pub map_token: Option<String>,
    pub water_stress_tile_url: Option<String>,

    // API server
    pub api_host: String,
    pub api_port: u16,
    pub projects_geojson: String,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, TerraPulseError> {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("TERRAPULSE_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        url::Url::parse(&api_base_url).map_err(|e| {
            TerraPulseError::Config(format!("TERRAPULSE_API_BASE_URL is not a URL: {e}"))
        })?;

        let api_port = match env::var("TERRAPULSE_API_PORT") {
            Ok(raw) => raw.parse().map_err(|_| {
                TerraPulseError::Config(format!("TERRAPULSE_API_PORT must be a number, got {raw}"))
            })?,
            Err(_) => 8000,
        };

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            map_token: optional_env("MAPBOX_TOKEN"),
            water_stress_tile_url: optional_env("WATER_STRESS_TILE_URL"),
            api_host: env::var("TERRAPULSE_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port,
            projects_geojson: env::var("TERRAPULSE_PROJECTS_GEOJSON")
                .unwrap_or_else(|_| DEFAULT_PROJECTS_GEOJSON.to_string()),
        })
    }

    /// Configuration for a map-less session against the given API.
    pub fn headless(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            map_token: None,
            water_stress_tile_url: None,
            api_host: "0.0.0.0".to_string(),
            api_port: 8000,
            projects_geojson: DEFAULT_PROJECTS_GEOJSON.to_string(),
        }
    }
}

/// Empty values count as unset.
fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
