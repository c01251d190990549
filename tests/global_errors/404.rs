//! tests/global_errors/404.rs
//! Ensures that hitting an unknown route returns HTTP 404.

use reqwest::StatusCode;

use crate::common;

#[tokio::test]
async fn returns_404_for_nonexistent_route() {
    let base_url: String = common::spawn_app(common::environment(common::UNREACHABLE_CONNECTION_STRING));

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/does-not-exist", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
