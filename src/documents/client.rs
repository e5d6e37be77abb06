// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP client for the external document service
//!
//! One POST per case with HTTP basic auth. The service wraps the document as
//! base64 inside a JSON envelope with its own response code.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{Connectivity, DocumentError, DocumentSource};
use crate::config::DocumentApiConfig;

/// Case id used by the connectivity probe
const PROBE_CASE_ID: i32 = 1;

/// Request envelope expected by the document service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentRequest {
    #[serde(rename = "CaseID")]
    pub case_id: String,
    #[serde(rename = "RequestID")]
    pub request_id: String,
    #[serde(rename = "DocumentType")]
    pub document_type: String,
}

/// Response envelope returned by the document service
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentResponse {
    #[serde(rename = "EntryID", default)]
    pub entry_id: Option<String>,
    #[serde(rename = "ResponseCode", default)]
    pub response_code: Option<String>,
    #[serde(rename = "RespondMessage", default)]
    pub respond_message: Option<String>,
    #[serde(rename = "StreamBytes", default)]
    pub stream_bytes: Option<String>,
}

impl DocumentResponse {
    /// "200" and "0" both signal success
    pub fn is_success(&self) -> bool {
        matches!(self.response_code.as_deref(), Some("200") | Some("0"))
    }

    /// Decode the embedded document
    ///
    /// `Ok(None)` for an error code or an empty body.
    pub fn into_document(self, case_id: i32) -> Result<Option<Vec<u8>>, DocumentError> {
        if !self.is_success() {
            warn!(
                "Document service returned error code {:?} for CaseID {}: {:?}",
                self.response_code, case_id, self.respond_message
            );
            return Ok(None);
        }

        let stream_bytes = match self.stream_bytes.as_deref().map(str::trim) {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => {
                warn!("Empty StreamBytes returned for CaseID {}", case_id);
                return Ok(None);
            }
        };

        let document = STANDARD
            .decode(stream_bytes)
            .map_err(|e| DocumentError::InvalidPayload {
                case_id,
                reason: e.to_string(),
            })?;
        Ok(Some(document))
    }
}

/// Pooled reqwest client for the document service
pub struct DocumentServiceClient {
    client: Client,
    config: DocumentApiConfig,
}

impl DocumentServiceClient {
    /// Build the client with the configured timeouts and pool size
    pub fn new(config: DocumentApiConfig) -> Result<Self, DocumentError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.read_timeout())
            .pool_max_idle_per_host(config.max_connections_per_route)
            .build()
            .map_err(|e| DocumentError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn request_for(&self, case_id: i32) -> DocumentRequest {
        DocumentRequest {
            case_id: case_id.to_string(),
            request_id: String::new(),
            document_type: self.config.document_type.clone(),
        }
    }

    async fn post(&self, case_id: i32) -> Result<reqwest::Response, DocumentError> {
        if !self.config.is_configured() {
            return Err(DocumentError::NotConfigured);
        }

        self.client
            .post(&self.config.url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(&self.request_for(case_id))
            .send()
            .await
            .map_err(|e| DocumentError::Transport(e.to_string()))
    }
}

#[async_trait]
impl DocumentSource for DocumentServiceClient {
    async fn fetch_document(&self, case_id: i32) -> Result<Option<Vec<u8>>, DocumentError> {
        info!("Fetching document for CaseID: {}", case_id);

        let response = self.post(case_id).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DocumentError::Transport(format!("HTTP {}", status.as_u16())));
        }

        let envelope: DocumentResponse = response
            .json()
            .await
            .map_err(|e| DocumentError::Transport(e.to_string()))?;

        let document = envelope.into_document(case_id)?;
        if let Some(bytes) = &document {
            debug!("Fetched document for CaseID {} ({} bytes)", case_id, bytes.len());
        }
        Ok(document)
    }

    async fn probe(&self) -> Connectivity {
        match self.post(PROBE_CASE_ID).await {
            Ok(response) => classify_status(response.status()),
            Err(DocumentError::NotConfigured) => Connectivity::unreachable("Not configured"),
            Err(e) => Connectivity::unreachable(format!("Not accessible - {}", e)),
        }
    }

    fn describe(&self) -> String {
        self.config.url.clone()
    }
}

/// Summarise the probe's HTTP status
pub fn classify_status(status: StatusCode) -> Connectivity {
    let detail = if status.is_success() {
        format!("Connected (HTTP {})", status.as_u16())
    } else if status == StatusCode::UNAUTHORIZED {
        "Connected - Authentication failed".to_string()
    } else if status == StatusCode::NOT_FOUND {
        "Connected - Endpoint not found".to_string()
    } else {
        format!("Connected - HTTP {}", status.as_u16())
    };
    Connectivity::reachable(detail)
}
