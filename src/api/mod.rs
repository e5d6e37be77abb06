// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod customers;
pub mod errors;
pub mod health;
pub mod http_server;
pub mod session;

pub use customers::{CustomerInfoResponse, CustomerQuery, DocumentServiceTestResponse};
pub use errors::{ApiError, ErrorResponse};
pub use health::{DetailedHealthResponse, DocumentServiceStatusResponse, HealthResponse};
pub use http_server::{create_app, start_server, AppState};
pub use session::SessionCountResponse;
