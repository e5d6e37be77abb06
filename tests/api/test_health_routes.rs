// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Health route tests

use crate::common::{open_session, test_state};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use customer_doc_gateway::{
    api::{create_app, DetailedHealthResponse, DocumentServiceStatusResponse, HealthResponse},
    version, InMemoryDocuments,
};
use tower::util::ServiceExt; // for `oneshot`

async fn get_json<T: serde::de::DeserializeOwned>(app: &axum::Router, uri: &str) -> T {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_is_up() {
    let app = create_app(test_state(InMemoryDocuments::new()).await);

    let health: HealthResponse = get_json(&app, "/health").await;
    assert_eq!(health.status, "UP");
    assert_eq!(health.application, version::APPLICATION);
    assert_eq!(health.version, version::VERSION_NUMBER);
}

#[tokio::test]
async fn test_detailed_health_counts_sessions() {
    let state = test_state(InMemoryDocuments::new()).await;
    open_session(&state.context).await;
    open_session(&state.context).await;
    let app = create_app(state);

    let health: DetailedHealthResponse = get_json(&app, "/health/detailed").await;
    assert_eq!(health.status, "UP");
    assert_eq!(health.active_sessions, 2);
    assert!(health.memory.used_mb <= health.memory.total_mb);
    assert!(health.document_service.connectivity.reachable);
    assert_eq!(health.document_service.endpoint, "in-memory");
}

#[tokio::test]
async fn test_document_service_status() {
    let app = create_app(test_state(InMemoryDocuments::new()).await);

    let status: DocumentServiceStatusResponse = get_json(&app, "/health/document-service").await;
    assert_eq!(status.status, "UP");
    assert_eq!(status.endpoint, "in-memory");
}
