// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod documents;
pub mod version;

pub use api::{create_app, AppState};
pub use config::{DocumentApiConfig, GatewayConfig};
pub use crypto::{CryptoError, SessionContext};
pub use documents::{DocumentServiceClient, DocumentSource, InMemoryDocuments};
