// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Session route tests
//!
//! Exercise /keys/public, /session/start, /session/count and
//! DELETE /session/:session_id through the full router.

use crate::common::{random_session_key, test_state, wrap_session_key};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use customer_doc_gateway::{
    api::{create_app, ErrorResponse, SessionCountResponse},
    crypto::SessionStartResponse,
    InMemoryDocuments,
};
use serde_json::json;
use tower::util::ServiceExt; // for `oneshot`

async fn setup_app() -> Router {
    create_app(test_state(InMemoryDocuments::new()).await)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn fetch_public_key(app: &Router) -> String {
    let (status, body) = send(app, get("/keys/public")).await;
    assert_eq!(status, StatusCode::OK);
    String::from_utf8(body).unwrap()
}

async fn start_session(app: &Router) -> String {
    let public_key = fetch_public_key(app).await;
    let payload = wrap_session_key(&public_key, &random_session_key());

    let (status, body) = send(app, post_json("/session/start", json!({ "encryptedKey": payload }))).await;
    assert_eq!(status, StatusCode::OK);
    let response: SessionStartResponse = serde_json::from_slice(&body).unwrap();
    response.session_id
}

async fn active_sessions(app: &Router) -> usize {
    let (status, body) = send(app, get("/session/count")).await;
    assert_eq!(status, StatusCode::OK);
    let count: SessionCountResponse = serde_json::from_slice(&body).unwrap();
    count.active_sessions
}

#[tokio::test]
async fn test_public_key_route_returns_der_base64() {
    let app = setup_app().await;

    let response = app.clone().oneshot(get("/keys/public")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let der = STANDARD.decode(&body).unwrap();
    assert_eq!(der.len(), 294);

    // Same key on every call
    assert_eq!(fetch_public_key(&app).await, String::from_utf8(body.to_vec()).unwrap());
}

#[tokio::test]
async fn test_start_session_returns_handle() {
    let app = setup_app().await;
    assert_eq!(active_sessions(&app).await, 0);

    let first = start_session(&app).await;
    let second = start_session(&app).await;

    assert_ne!(first, second);
    assert_eq!(active_sessions(&app).await, 2);
}

#[tokio::test]
async fn test_start_session_response_is_camel_case() {
    let app = setup_app().await;
    let public_key = fetch_public_key(&app).await;
    let payload = wrap_session_key(&public_key, &random_session_key());

    let (_, body) = send(&app, post_json("/session/start", json!({ "encryptedKey": payload }))).await;
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(value["sessionId"].is_string());
}

#[tokio::test]
async fn test_start_session_missing_key() {
    let app = setup_app().await;

    let (status, body) = send(&app, post_json("/session/start", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.message, "No encryptedKey provided");
    assert_eq!(active_sessions(&app).await, 0);
}

#[tokio::test]
async fn test_start_session_rejects_bad_payloads() {
    let app = setup_app().await;

    for payload in ["not base64!!", "AAECAwQFBgcICQ==", ""] {
        let (status, _) =
            send(&app, post_json("/session/start", json!({ "encryptedKey": payload }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {:?}", payload);
    }
    assert_eq!(active_sessions(&app).await, 0);
}

#[tokio::test]
async fn test_start_session_rejects_wrong_key_length() {
    let app = setup_app().await;
    let public_key = fetch_public_key(&app).await;
    let payload = wrap_session_key(&public_key, &[9u8; 16]);

    let (status, _) = send(&app, post_json("/session/start", json!({ "encryptedKey": payload }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(active_sessions(&app).await, 0);
}

#[tokio::test]
async fn test_close_session_is_idempotent() {
    let app = setup_app().await;
    let session_id = start_session(&app).await;
    assert_eq!(active_sessions(&app).await, 1);

    for _ in 0..2 {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/session/{}", session_id))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
    }
    assert_eq!(active_sessions(&app).await, 0);
}

#[tokio::test]
async fn test_close_unknown_session_succeeds() {
    let app = setup_app().await;
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/session/never-issued")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_start_session_rejects_get() {
    let app = setup_app().await;
    let (status, _) = send(&app, get("/session/start")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
