// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use customer_doc_gateway::{
    api::start_server, AppState, DocumentServiceClient, GatewayConfig, SessionContext,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    tracing::info!(
        "🚀 Starting {}",
        customer_doc_gateway::version::get_version_string()
    );

    let config = GatewayConfig::from_env();
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    if !config.document_api.is_configured() {
        tracing::warn!("⚠️  DOCUMENT_API_URL not set; document routes will report unavailable");
    }

    // Key pair generation failure is fatal
    let context = SessionContext::generate(config.session_ttl())
        .map_err(|e| anyhow!("Failed to initialise session keys: {}", e))?;
    tracing::info!(
        "🔑 Session TTL: {}s, background sweep: {}",
        config.session_ttl_secs,
        config
            .session_sweep_interval()
            .map(|i| format!("every {}s", i.as_secs()))
            .unwrap_or_else(|| "disabled".to_string())
    );

    let documents = DocumentServiceClient::new(config.document_api.clone())
        .map_err(|e| anyhow!("Failed to build document client: {}", e))?;

    let state = AppState::new(context, Arc::new(documents), config);
    start_server(state).await?;

    tracing::info!("👋 Gateway stopped");
    Ok(())
}
