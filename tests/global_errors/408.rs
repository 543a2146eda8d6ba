//! tests/global_errors/408.rs
//! Ensures that a provider slower than the request timeout results in a 408.

use httpmock::prelude::*;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;

use crate::common;

#[tokio::test]
async fn returns_408_when_request_times_out() {
    let server: MockServer = MockServer::start_async().await;

    server.mock_async(|when, then| {
        when.method(POST).path(common::GROQ_COMPLETIONS_PATH);
        then.status(200)
            .delay(Duration::from_secs(4))
            .json_body(serde_json::json!({ "choices": [] }));
    }).await;

    let mut vars = common::provider_vars(&server.base_url());
    vars.insert("DEFAULT_TIMEOUT_SECONDS".to_string(), "1".to_string());
    let base_url: String = common::spawn_app(vars).await;

    let resp_result: Result<reqwest::Response, tokio::time::error::Elapsed> = timeout(
        Duration::from_secs(3), // client-side timeout duration
        common::post_insight(&base_url, common::answer_body(common::VALID_ANSWER)),
    )
    .await;

    // Ensure the client did not time out waiting for a response.
    let resp: reqwest::Response = resp_result.expect("Client timed out waiting for server.");

    assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "REQUEST_TIMEOUT");
    assert_eq!(json["code"], 408);
}
