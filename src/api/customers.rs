// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Customer document routes
//!
//! Every route takes an encrypted customer token in the path and the session
//! handle as `?sessionId=`. The token is resolved first; only a resolved
//! customer number ever reaches the document service.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{http_server::AppState, ApiError};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerQuery {
    pub session_id: String,
    #[serde(default)]
    pub download: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfoResponse {
    pub customer_id: i32,
    pub case_id: String,
    pub document_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_size: Option<usize>,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentServiceTestResponse {
    pub customer_id: i32,
    pub case_id: String,
    pub source: String,
    pub success: bool,
    pub document_size: usize,
    pub message: String,
}

/// GET /api/customers/download/:encrypted_id
///
/// Streams the customer's document. `download=true` asks the browser to
/// save it instead of displaying it inline.
pub async fn download_handler(
    State(state): State<AppState>,
    Path(encrypted_id): Path<String>,
    Query(query): Query<CustomerQuery>,
) -> Result<Response, ApiError> {
    let customer_id = state.context.resolve(&query.session_id, &encrypted_id).await?;

    let document = state
        .documents
        .fetch_document(customer_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("Document not found for customer {}", customer_id))
        })?;

    let disposition = if query.download { "attachment" } else { "inline" };
    tracing::info!(
        "Serving document for customer {} ({} bytes, download={})",
        customer_id,
        document.len(),
        query.download
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!(
                    "{}; filename=\"customer_{}_document.pdf\"",
                    disposition, customer_id
                ),
            ),
            (
                header::CACHE_CONTROL,
                "no-cache, no-store, must-revalidate".to_string(),
            ),
            (header::PRAGMA, "no-cache".to_string()),
            (header::EXPIRES, "0".to_string()),
        ],
        document,
    )
        .into_response())
}

/// GET /api/customers/:encrypted_id/info
pub async fn info_handler(
    State(state): State<AppState>,
    Path(encrypted_id): Path<String>,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<CustomerInfoResponse>, ApiError> {
    let customer_id = state.context.resolve(&query.session_id, &encrypted_id).await?;

    let document = match state.documents.fetch_document(customer_id).await {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!("Document lookup failed for customer {}: {}", customer_id, e);
            None
        }
    };

    Ok(Json(CustomerInfoResponse {
        customer_id,
        case_id: customer_id.to_string(),
        document_exists: document.is_some(),
        document_size: document.map(|d| d.len()),
        source: state.documents.describe(),
    }))
}

/// POST /api/customers/:encrypted_id/test-api
///
/// Diagnostic call against the document service for a resolved customer.
pub async fn test_document_service_handler(
    State(state): State<AppState>,
    Path(encrypted_id): Path<String>,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<DocumentServiceTestResponse>, ApiError> {
    let customer_id = state.context.resolve(&query.session_id, &encrypted_id).await?;

    let (success, document_size, message) =
        match state.documents.fetch_document(customer_id).await {
            Ok(Some(document)) => (true, document.len(), "Document fetched successfully".to_string()),
            Ok(None) => (false, 0, "No document data returned".to_string()),
            Err(e) => {
                tracing::warn!("Document service test failed for customer {}: {}", customer_id, e);
                (false, 0, "Document service request failed".to_string())
            }
        };

    Ok(Json(DocumentServiceTestResponse {
        customer_id,
        case_id: customer_id.to_string(),
        source: state.documents.describe(),
        success,
        document_size,
        message,
    }))
}
