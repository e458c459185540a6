//! Gateway contract tests: error classification and the in-memory mock.
//!
//! Run with: cargo test -p terrapulse-client --test gateway_test

use terrapulse_client::testing::{Endpoint, MockGateway};
use terrapulse_client::{ApiClient, DataGateway, GatewayError};
use terrapulse_common::{DataSource, Geometry, Project, ScenarioParameters};

fn project(id: &str) -> Project {
    Project {
        project_id: id.into(),
        name: id.into(),
        county: "Loudoun".into(),
        footprint_acres: 10.0,
        change_area_m2: 1000.0,
        intensity_score: 50,
        date_range: "Unknown".into(),
        water_stress_normalized: 0.5,
        center: [-77.5, 39.0],
        geometry: Geometry::Point([-77.5, 39.0]),
    }
}

#[tokio::test]
async fn unreachable_api_is_a_network_error() {
    // Port 9 (discard) is reserved and not expected to accept HTTP.
    let client = ApiClient::new("http://127.0.0.1:9/");
    assert_eq!(client.base_url(), "http://127.0.0.1:9");

    let err = client.list_projects().await.unwrap_err();
    assert!(matches!(err, GatewayError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn mock_serves_and_replaces_projects() {
    let gateway = MockGateway::new().with_projects(vec![project("a"), project("b")]);
    assert_eq!(gateway.list_projects().await.unwrap().len(), 2);

    gateway.set_projects(vec![project("c")]);
    let projects = gateway.list_projects().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].project_id, "c");
    assert_eq!(gateway.calls(Endpoint::ListProjects), 2);
}

#[tokio::test]
async fn mock_failures_are_api_errors_and_recoverable() {
    let gateway = MockGateway::new()
        .with_projects(vec![project("a")])
        .failing(Endpoint::ListProjects);

    let err = gateway.list_projects().await.unwrap_err();
    assert!(matches!(err, GatewayError::Api { status: 503, .. }));

    gateway.set_failing(Endpoint::ListProjects, false);
    assert!(gateway.list_projects().await.is_ok());
}

#[tokio::test]
async fn mock_meta_defaults_to_sample_source() {
    let gateway = MockGateway::new().with_projects(vec![project("a")]);
    let meta = gateway.get_meta().await.unwrap();
    assert_eq!(meta.data_source, DataSource::Sample);
    assert_eq!(meta.project_count, 1);
}

#[tokio::test]
async fn unknown_project_is_not_found() {
    let gateway = MockGateway::new();
    let err = gateway.get_project("missing").await.unwrap_err();
    assert!(matches!(err, GatewayError::Api { status: 404, .. }));

    let err = gateway
        .compute_score("missing", ScenarioParameters::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Api { status: 404, .. }));
}
