//! Failure injection against a mock of the hosted inference API.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

use common::{client, spawn_gateway_from_config, start_mock_upstream, test_config, API_KEY};

async fn translate(addr: std::net::SocketAddr, body: Value) -> (StatusCode, Value) {
    let res = client()
        .post(format!("http://{}/", addr))
        .header("X-API-Key", API_KEY)
        .json(&body)
        .send()
        .await
        .expect("gateway unreachable");
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn test_forwards_normalized_request_to_model() {
    let (base_url, calls) = start_mock_upstream(|_body| async {
        (
            200,
            json!({"success": true, "result": {"translated_text": "bonjour"}, "errors": [], "messages": []})
                .to_string(),
        )
    })
    .await;
    let (addr, shutdown) = spawn_gateway_from_config(test_config(&base_url)).await;

    let (status, body) = translate(addr, json!({"text": "hello", "target_lang": "french"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "original": {"text": "hello", "source_lang": "english", "target_lang": "french"},
            "translation": "bonjour"
        })
    );

    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].path, "/client/v4/accounts/acct/ai/run/@cf/meta/m2m100-1.2b");
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer upstream-token"));
    assert_eq!(
        calls[0].body,
        json!({"text": "hello", "source_lang": "english", "target_lang": "french"})
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_error_message_surfaces() {
    let (base_url, _calls) = start_mock_upstream(|_body| async {
        (
            400,
            json!({"success": false, "result": null, "errors": [{"code": 5006, "message": "boom"}]})
                .to_string(),
        )
    })
    .await;
    let (addr, shutdown) = spawn_gateway_from_config(test_config(&base_url)).await;

    let (status, body) = translate(addr, json!({"text": "hello", "target_lang": "fr"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "boom"}));

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_failure_without_errors_is_unknown_error() {
    let (base_url, _calls) =
        start_mock_upstream(|_body| async { (500, json!({"success": false}).to_string()) }).await;
    let (addr, shutdown) = spawn_gateway_from_config(test_config(&base_url)).await;

    let (status, body) = translate(addr, json!({"text": "hello", "target_lang": "fr"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "Unknown error"}));

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_translated_text_is_server_error() {
    let (base_url, _calls) = start_mock_upstream(|_body| async {
        (200, json!({"success": true, "result": {}}).to_string())
    })
    .await;
    let (addr, shutdown) = spawn_gateway_from_config(test_config(&base_url)).await;

    let (status, body) = translate(addr, json!({"text": "hello", "target_lang": "fr"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"success": false, "error": "upstream response did not include translated_text"})
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let (base_url, calls) = start_mock_upstream(|_body| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        (200, json!({"success": true, "result": {"translated_text": "late"}}).to_string())
    })
    .await;
    let mut config = test_config(&base_url);
    config.translator.timeout_secs = 1;
    let (addr, shutdown) = spawn_gateway_from_config(config).await;

    let (status, body) = translate(addr, json!({"text": "hello", "target_lang": "fr"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"success": false, "error": "translation timed out after 1s"})
    );
    assert_eq!(calls.lock().unwrap().len(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_is_server_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = listener.local_addr().unwrap();
    drop(listener);

    let (addr, shutdown) =
        spawn_gateway_from_config(test_config(&format!("http://{}/client/v4", dead))).await;

    let (status, body) = translate(addr, json!({"text": "hello", "target_lang": "fr"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(!body["error"].as_str().unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_rejected_requests_never_reach_upstream() {
    let (base_url, calls) = start_mock_upstream(|_body| async {
        (200, json!({"success": true, "result": {"translated_text": "x"}}).to_string())
    })
    .await;
    let (addr, shutdown) = spawn_gateway_from_config(test_config(&base_url)).await;

    let (status, _) = translate(addr, json!({"text": "", "target_lang": "fr"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let res = client()
        .post(format!("http://{}/", addr))
        .json(&json!({"text": "hello", "target_lang": "fr"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    assert!(calls.lock().unwrap().is_empty());
    shutdown.trigger();
}
