//! tests/insight/fallback.rs
//! Groq is asked first; Hugging Face only runs when Groq fails.

use httpmock::prelude::*;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::common;

fn groq_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn primary_success_skips_fallback() {
    let server: MockServer = MockServer::start_async().await;

    let groq = server.mock_async(|when, then| {
        when.method(POST)
            .path(common::GROQ_COMPLETIONS_PATH)
            .header("authorization", "Bearer gsk-test-key")
            .json_body_partial(r#"{"model":"llama-3.3-70b-versatile","temperature":0.6,"max_tokens":2000}"#)
            .body_contains("Batman or Superman")
            .body_contains("he had to earn through preparation");
        then.status(200).json_body(groq_completion("  1. Core Personality Orientation\nYou earn things.  "));
    }).await;

    let hf = server.mock_async(|when, then| {
        when.method(POST).path(common::HF_MODEL_PATH);
        then.status(200).json_body(json!([{ "generated_text": "fallback report" }]));
    }).await;

    let base_url: String = common::spawn_app(common::provider_vars(&server.base_url())).await;
    let resp: reqwest::Response =
        common::post_insight(&base_url, common::answer_body(common::VALID_ANSWER)).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["report"], "1. Core Personality Orientation\nYou earn things.");
    assert_eq!(json["status"], "OK");
    assert_eq!(json["code"], 200);

    groq.assert_async().await;
    hf.assert_hits_async(0).await;
}

#[tokio::test]
async fn primary_error_status_falls_back() {
    let server: MockServer = MockServer::start_async().await;

    let groq = server.mock_async(|when, then| {
        when.method(POST).path(common::GROQ_COMPLETIONS_PATH);
        then.status(429).json_body(json!({ "error": { "message": "Rate limit reached" } }));
    }).await;

    let hf = server.mock_async(|when, then| {
        when.method(POST)
            .path(common::HF_MODEL_PATH)
            .header("authorization", "Bearer hf-test-key")
            .json_body_partial(r#"{"parameters":{"max_new_tokens":2000,"return_full_text":false}}"#)
            .body_contains("Assistant:");
        then.status(200).json_body(json!([{ "generated_text": "\nfallback report\n" }]));
    }).await;

    let base_url: String = common::spawn_app(common::provider_vars(&server.base_url())).await;
    let resp: reqwest::Response =
        common::post_insight(&base_url, common::answer_body(common::VALID_ANSWER)).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["report"], "fallback report");

    groq.assert_async().await;
    hf.assert_async().await;
}

#[tokio::test]
async fn malformed_or_empty_primary_body_falls_back() {
    for groq_body in ["<html>bad gateway</html>".to_string(), groq_completion("   ").to_string()] {
        let server: MockServer = MockServer::start_async().await;

        server.mock_async(|when, then| {
            when.method(POST).path(common::GROQ_COMPLETIONS_PATH);
            then.status(200).body(groq_body.as_str());
        }).await;

        let hf = server.mock_async(|when, then| {
            when.method(POST).path(common::HF_MODEL_PATH);
            then.status(200).json_body(json!({ "generated_text": "object shaped report" }));
        }).await;

        let base_url: String = common::spawn_app(common::provider_vars(&server.base_url())).await;
        let resp: reqwest::Response =
            common::post_insight(&base_url, common::answer_body(common::VALID_ANSWER)).await;

        assert_eq!(resp.status(), StatusCode::OK);

        let json: Value = resp.json().await.unwrap();
        assert_eq!(json["report"], "object shaped report");
        hf.assert_async().await;
    }
}

#[tokio::test]
async fn unreachable_primary_falls_back() {
    let server: MockServer = MockServer::start_async().await;

    let hf = server.mock_async(|when, then| {
        when.method(POST)
            .path(common::HF_MODEL_PATH)
            .header("authorization", "Bearer hf-test-key");
        then.status(200).json_body(json!([{ "generated_text": "report after connection refused" }]));
    }).await;

    // * Nothing listens on port 1, so the Groq call fails before any response.
    let base_url: String = common::spawn_app(common::vars(&[
        ("GROQ_API_KEY", common::GROQ_KEY),
        ("GROQ_BASE_URL", "http://127.0.0.1:1/openai/v1"),
        ("HUGGINGFACE_API_KEY", common::HF_KEY),
        ("HUGGINGFACE_BASE_URL", server.base_url().as_str()),
    ])).await;
    let resp: reqwest::Response =
        common::post_insight(&base_url, common::answer_body(common::VALID_ANSWER)).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["report"], "report after connection refused");
    hf.assert_async().await;
}

#[tokio::test]
async fn only_fallback_configured_is_used_directly() {
    let server: MockServer = MockServer::start_async().await;

    let hf = server.mock_async(|when, then| {
        when.method(POST).path(common::HF_MODEL_PATH);
        then.status(200).json_body(json!([{ "generated_text": "hf only report" }]));
    }).await;

    let base_url: String = common::spawn_app(common::vars(&[
        ("HUGGINGFACE_API_KEY", common::HF_KEY),
        ("HUGGINGFACE_BASE_URL", server.base_url().as_str()),
    ])).await;
    let resp: reqwest::Response =
        common::post_insight(&base_url, common::answer_body(common::VALID_ANSWER)).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["report"], "hf only report");
    hf.assert_async().await;
}

#[tokio::test]
async fn both_failing_returns_500_with_hint() {
    let server: MockServer = MockServer::start_async().await;

    server.mock_async(|when, then| {
        when.method(POST).path(common::GROQ_COMPLETIONS_PATH);
        then.status(401).json_body(json!({ "error": { "message": "Invalid API Key" } }));
    }).await;

    server.mock_async(|when, then| {
        when.method(POST).path(common::HF_MODEL_PATH);
        then.status(503).body("Model mistralai/Mistral-7B-Instruct-v0.2 is currently loading");
    }).await;

    let base_url: String = common::spawn_app(common::provider_vars(&server.base_url())).await;
    let resp: reqwest::Response =
        common::post_insight(&base_url, common::answer_body(common::VALID_ANSWER)).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json: Value = resp.json().await.unwrap();
    let message: &str = json["error"].as_str().unwrap();
    assert!(message.starts_with("No insight was generated."));
    assert!(message.contains("(Server log: Hugging Face 503: Model mistralai"));
    assert!(json.get("report").is_none());
}
