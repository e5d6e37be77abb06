// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Key publication and session lifecycle routes

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{http_server::AppState, ApiError};
use crate::crypto::{SessionStartRequest, SessionStartResponse};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionCountResponse {
    pub active_sessions: usize,
}

/// GET /keys/public
///
/// Returns the RSA public key as base64 of its SubjectPublicKeyInfo DER.
pub async fn public_key_handler(State(state): State<AppState>) -> impl IntoResponse {
    let public_key = state.context.public_key_base64();
    tracing::debug!("Public key requested ({} chars)", public_key.len());
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        public_key,
    )
}

/// POST /session/start
///
/// Body `{"encryptedKey": "<base64 RSA-OAEP ciphertext>"}`.
pub async fn start_session_handler(
    State(state): State<AppState>,
    Json(request): Json<SessionStartRequest>,
) -> Result<Json<SessionStartResponse>, ApiError> {
    let encrypted_key = request
        .encrypted_key
        .ok_or_else(|| ApiError::InvalidRequest("No encryptedKey provided".to_string()))?;

    let session_id = state.context.begin_session(&encrypted_key).await?;
    tracing::info!(
        "✅ Session created: {} (active sessions: {})",
        session_id,
        state.context.active_sessions().await
    );

    Ok(Json(SessionStartResponse { session_id }))
}

/// DELETE /session/:session_id
pub async fn close_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> StatusCode {
    state.context.close_session(&session_id).await;
    StatusCode::OK
}

/// GET /session/count
pub async fn session_count_handler(State(state): State<AppState>) -> Json<SessionCountResponse> {
    Json(SessionCountResponse {
        active_sessions: state.context.active_sessions().await,
    })
}
