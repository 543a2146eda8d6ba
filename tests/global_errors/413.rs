//! tests/global_errors/413.rs
//! Ensures that a payload above MAX_REQUEST_BODY_SIZE triggers 413.

use reqwest::StatusCode;
use serde_json::Value;

use crate::common;

#[tokio::test]
async fn returns_413_when_payload_exceeds_global_limit() {
    let base_url: String =
        common::spawn_app(common::vars(&[("MAX_REQUEST_BODY_SIZE", "1024")])).await;

    let oversized_answer: String = "Batman ".repeat(400);
    let resp: reqwest::Response =
        common::post_insight(&base_url, common::answer_body(&oversized_answer)).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "PAYLOAD_TOO_LARGE");
    assert_eq!(json["code"], 413);
}
