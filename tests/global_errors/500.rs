//! tests/global_errors/500.rs
//! Ensures that an unreachable database maps to a bare HTTP 500.

use reqwest::StatusCode;
use std::time::Duration;

use postgres_test_api::EnvironmentVariables;

use crate::common;

#[tokio::test]
async fn returns_500_when_database_is_unreachable() {
    let base_url: String = common::spawn_app(common::environment(common::UNREACHABLE_CONNECTION_STRING));

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/postgresql", base_url))
        .send()
        .await
        .expect("Failed to make request.");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // No partial results and no custom error payload
    let body: String = resp.text().await.unwrap();
    assert!(body.is_empty(), "unexpected body: {body}");
}

#[tokio::test]
async fn returns_500_when_connection_string_is_malformed() {
    let base_url: String = common::spawn_app(common::environment("not a connection string"));

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/postgresql", base_url))
        .send()
        .await
        .expect("Failed to make request.");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn returns_500_when_database_never_answers() {
    let mut env: EnvironmentVariables = common::environment(&common::spawn_silent_database().await);
    env.db_connect_timeout_seconds = 2;
    // Shorter than the connect timeout; must not turn the call into a 408
    env.default_timeout_seconds = 1;
    let base_url: String = common::spawn_app(env);

    let resp: reqwest::Response = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
        .get(format!("{}/postgresql", base_url))
        .send()
        .await
        .expect("Server did not answer within the client timeout.");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: String = resp.text().await.unwrap();
    assert!(body.is_empty(), "unexpected body: {body}");
}

#[tokio::test]
async fn returns_500_when_connection_string_is_required_but_missing() {
    let mut env: EnvironmentVariables = EnvironmentVariables::from_vars(&Default::default()).unwrap();
    env.require_connection_string = true;
    let base_url: String = common::spawn_app(env);

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/postgresql", base_url))
        .send()
        .await
        .expect("Failed to make request.");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
