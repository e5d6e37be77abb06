// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Document retrieval
//!
//! Once a customer token is resolved, the customer number is used as the
//! case id for the external document service. This module holds the
//! `DocumentSource` seam plus the HTTP client and an in-memory source.

pub mod client;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::DocumentServiceClient;
pub use memory::InMemoryDocuments;

/// Errors from the document collaborator
#[derive(Error, Debug)]
pub enum DocumentError {
    /// No document service URL configured
    #[error("Document service is not configured")]
    NotConfigured,

    /// Network, timeout or HTTP protocol failure
    #[error("Document service request failed: {0}")]
    Transport(String),

    /// Service answered but the document bytes could not be decoded
    #[error("Document payload for case {case_id} is invalid: {reason}")]
    InvalidPayload { case_id: i32, reason: String },
}

/// Result of a connectivity probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connectivity {
    /// True when the service answered at all (even with an auth failure)
    pub reachable: bool,
    /// Human readable summary, e.g. "Connected (HTTP 200)"
    pub detail: String,
}

impl Connectivity {
    pub fn reachable(detail: impl Into<String>) -> Self {
        Self {
            reachable: true,
            detail: detail.into(),
        }
    }

    pub fn unreachable(detail: impl Into<String>) -> Self {
        Self {
            reachable: false,
            detail: detail.into(),
        }
    }
}

/// Source of customer documents keyed by case id
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the document bytes for a case
    ///
    /// `Ok(None)` means the service has no document for the case.
    async fn fetch_document(&self, case_id: i32) -> Result<Option<Vec<u8>>, DocumentError>;

    /// Check that the service can be reached
    async fn probe(&self) -> Connectivity;

    /// Short name for status payloads
    fn describe(&self) -> String;
}
