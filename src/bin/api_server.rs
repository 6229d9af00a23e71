// src/bin/api_server.rs

use customer_product_api::infra::logging;
use customer_product_api::transport;
use customer_product_api::{AppConfig, PgExecutor, QueryExecutor, ResourceRegistry};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    // --- Configuration ---
    let config = AppConfig::from_env()?;
    info!(database = %config.database.describe(), "configuration loaded");

    // --- Store ---
    // The pool connects lazily so the server comes up even while the store is down.
    let executor = Arc::new(PgExecutor::connect_lazy(&config.database));

    // --- Routes ---
    let registry = ResourceRegistry::standard();
    info!(resources = ?registry.list_models(), "registering resources");
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(&registry, executor.clone())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    info!("server running at http://{}/", config.listen_addr());

    match executor.ping().await {
        Ok(()) => info!("database connection established"),
        Err(e) => error!(error = %e, "could not connect to the database; continuing"),
    }

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            executor.pool().close().await;
            info!("graceful shutdown complete");
        }
    }

    Ok(())
}
