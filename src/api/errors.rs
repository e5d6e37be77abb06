// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::CryptoError;
use crate::documents::DocumentError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    InvalidRequest(String),
    /// Unknown or expired session
    InvalidSession,
    /// Identifier token rejected for any reason
    InvalidIdentifier,
    NotFound(String),
    BadGateway(String),
    ServiceUnavailable(String),
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let (error_type, message) = match self {
            ApiError::InvalidRequest(msg) => ("invalid_request", msg.clone()),
            ApiError::InvalidSession => ("invalid_session", "Invalid session".to_string()),
            ApiError::InvalidIdentifier => {
                ("invalid_identifier", "Invalid customer ID".to_string())
            }
            ApiError::NotFound(msg) => ("not_found", msg.clone()),
            ApiError::BadGateway(msg) => ("bad_gateway", msg.clone()),
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg.clone()),
            ApiError::InternalError(_) => ("internal_error", "Server error".to_string()),
        };

        ErrorResponse {
            error_type: error_type.to_string(),
            message,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) | ApiError::InvalidIdentifier => 400,
            ApiError::InvalidSession => 403,
            ApiError::NotFound(_) => 404,
            ApiError::InternalError(_) => 500,
            ApiError::BadGateway(_) => 502,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::InvalidSession => write!(f, "Invalid session"),
            ApiError::InvalidIdentifier => write!(f, "Invalid customer ID"),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadGateway(msg) => write!(f, "Bad gateway: {}", msg),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

// Session failures collapse to one 403 and identifier failures to one 400,
// so a caller cannot tell a bad tag from a bad format or an unknown session
// from an expired one.
impl From<CryptoError> for ApiError {
    fn from(err: CryptoError) -> Self {
        tracing::warn!("Rejected request: {}", err);
        if err.is_session_failure() {
            ApiError::InvalidSession
        } else if err.is_identifier_failure() {
            ApiError::InvalidIdentifier
        } else if err.is_handshake_failure() {
            let message = match err {
                CryptoError::MalformedPayload => "Invalid base64 encoding",
                _ => "Key exchange failed",
            };
            ApiError::InvalidRequest(message.to_string())
        } else {
            ApiError::InternalError(err.to_string())
        }
    }
}

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        tracing::error!("Document retrieval failed: {}", err);
        match err {
            DocumentError::NotConfigured => {
                ApiError::ServiceUnavailable("Document service is not configured".to_string())
            }
            DocumentError::Transport(_) | DocumentError::InvalidPayload { .. } => {
                ApiError::BadGateway("Document service unavailable".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}
