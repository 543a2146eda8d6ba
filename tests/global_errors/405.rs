//! tests/global_errors/405.rs
//! The insight endpoint only accepts POST.

use reqwest::StatusCode;
use serde_json::Value;

use crate::common;

#[tokio::test]
async fn returns_405_for_get_on_insight() {
    let base_url: String = common::spawn_app(common::vars(&[])).await;

    let resp: reqwest::Response = reqwest::Client::new()
        .get(format!("{}/api/insight", base_url))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "METHOD_NOT_ALLOWED");
    assert_eq!(json["code"], 405);
}
