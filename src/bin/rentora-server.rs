// ABOUTME: Main server binary for the Rentora rental assistant backend
// ABOUTME: Wires config, database, assistant client, and HTTP routes together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Rentora

//! # Rentora Server
//!
//! Starts the HTTP API. Configuration is environment-only; see
//! `rentora_server::config::environment` for the variable reference.
//!
//! ```bash
//! OPENAI_API_KEY=sk-... OPENAI_ASSISTANT_ID=asst_... rentora-server
//! ```

use axum::Router;
use http::HeaderValue;
use rentora_server::config::ServerConfig;
use rentora_server::database::Database;
use rentora_server::llm::AssistantClient;
use rentora_server::logging;
use rentora_server::resources::ServerResources;
use rentora_server::routes::{
    ChatRoutes, HealthRoutes, LeadRoutes, PropertyRoutes, SchedulerRoutes,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Upper bound for a single request, covering the full conversation loop
const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = ServerConfig::from_env()?;
    info!("Starting Rentora server on port {}", config.http_port);

    let database = Database::new(&config.database_url).await?;
    let assistant = AssistantClient::new(config.assistant.clone())?;
    let resources = Arc::new(ServerResources::new(database, assistant, config.clone()));

    let app = Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(ChatRoutes::routes(resources.clone()))
        .merge(LeadRoutes::routes(resources.clone()))
        .merge(PropertyRoutes::routes(resources.clone()))
        .merge(SchedulerRoutes::routes(resources))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config)?)
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the CORS layer; no configured origins means permissive
fn cors_layer(config: &ServerConfig) -> anyhow::Result<CorsLayer> {
    if config.cors_allowed_origins.is_empty() {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
