// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Health and status routes

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sysinfo::System;

use super::http_server::AppState;
use crate::documents::Connectivity;
use crate::version;

const MB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub application: String,
    pub version: String,
    pub integration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryInfo {
    #[serde(rename = "totalMB")]
    pub total_mb: u64,
    #[serde(rename = "usedMB")]
    pub used_mb: u64,
    #[serde(rename = "freeMB")]
    pub free_mb: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentServiceInfo {
    pub endpoint: String,
    pub connectivity: Connectivity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub application: String,
    pub version: String,
    pub memory: MemoryInfo,
    pub active_sessions: usize,
    pub document_service: DocumentServiceInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentServiceStatusResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub connectivity: String,
}

fn memory_info() -> MemoryInfo {
    let mut system = System::new();
    system.refresh_memory();
    MemoryInfo {
        total_mb: system.total_memory() / MB,
        used_mb: system.used_memory() / MB,
        free_mb: system.available_memory() / MB,
    }
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        timestamp: Utc::now(),
        application: version::APPLICATION.to_string(),
        version: version::VERSION_NUMBER.to_string(),
        integration: version::INTEGRATION.to_string(),
    })
}

/// GET /health/detailed
///
/// Includes memory, the live session count (which sweeps expired sessions)
/// and a document-service probe.
pub async fn detailed_health_handler(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let connectivity = state.documents.probe().await;

    Json(DetailedHealthResponse {
        status: "UP".to_string(),
        timestamp: Utc::now(),
        application: version::APPLICATION.to_string(),
        version: version::VERSION_NUMBER.to_string(),
        memory: memory_info(),
        active_sessions: state.context.active_sessions().await,
        document_service: DocumentServiceInfo {
            endpoint: state.documents.describe(),
            connectivity,
        },
    })
}

/// GET /health/document-service
pub async fn document_service_status_handler(
    State(state): State<AppState>,
) -> Json<DocumentServiceStatusResponse> {
    let connectivity = state.documents.probe().await;

    Json(DocumentServiceStatusResponse {
        status: if connectivity.reachable { "UP" } else { "DOWN" }.to_string(),
        timestamp: Utc::now(),
        endpoint: state.documents.describe(),
        connectivity: connectivity.detail,
    })
}
