// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{customers, health, session};
use crate::{config::GatewayConfig, crypto::SessionContext, documents::DocumentSource};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<SessionContext>,
    pub documents: Arc<dyn DocumentSource>,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    pub fn new(
        context: SessionContext,
        documents: Arc<dyn DocumentSource>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            context: Arc::new(context),
            documents,
            config: Arc::new(config),
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}

pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        // Key exchange and sessions
        .route("/keys/public", get(session::public_key_handler))
        .route("/session/start", post(session::start_session_handler))
        .route("/session/count", get(session::session_count_handler))
        .route("/session/:session_id", delete(session::close_session_handler))
        // Customer documents
        .route(
            "/api/customers/download/:encrypted_id",
            get(customers::download_handler),
        )
        .route("/api/customers/:encrypted_id/info", get(customers::info_handler))
        .route(
            "/api/customers/:encrypted_id/test-api",
            post(customers::test_document_service_handler),
        )
        // Health
        .route("/health", get(health::health_handler))
        .route("/health/detailed", get(health::detailed_health_handler))
        .route(
            "/health/document-service",
            get(health::document_service_status_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Spawn the periodic expiry sweep if configured
pub fn spawn_session_sweeper(state: &AppState) -> Option<tokio::task::JoinHandle<()>> {
    let interval = state.config.session_sweep_interval()?;
    let context = state.context.clone();

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let evicted = context.sessions().purge_expired().await;
            if evicted > 0 {
                tracing::info!("🧹 Session sweep evicted {} expired sessions", evicted);
            }
        }
    }))
}

pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.listen_addr.parse::<SocketAddr>()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on {}", addr);

    serve_until(listener, state, async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Shutdown signal received");
    })
    .await
}

/// Serve on `listener` until `shutdown` resolves
///
/// Stops the sweeper and drops every session key once the server has drained.
pub async fn serve_until<F>(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let sweeper = spawn_session_sweeper(&state);
    let context = state.context.clone();
    let app = create_app(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    if let Some(sweeper) = sweeper {
        sweeper.abort();
    }
    context.sessions().clear_all().await;
    Ok(())
}
