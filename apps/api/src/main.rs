mod auth;
mod catalog;
mod config;
mod db;
mod errors;
mod models;
mod orders;
mod profiles;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::provider::HttpSessionProvider;
use crate::config::Config;
use crate::db::create_pool;
use crate::orders::settlement::SettlementScheduler;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Craft API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (the record store behind profiles and orders)
    let db = create_pool(&config.database_url).await?;

    // Initialize the identity session provider client
    let sessions = Arc::new(HttpSessionProvider::new(
        config.identity_url.clone(),
        config.identity_anon_key.clone(),
    ));
    info!("Identity session provider client initialized");

    // Settlement timers live here so they stay cancellable until they fire
    let settlements = SettlementScheduler::new();
    info!(
        "Settlement scheduler ready (delay: {}ms)",
        config.settlement_delay_ms
    );

    // Build app state
    let state = AppState {
        db,
        sessions,
        settlements: settlements.clone(),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await?;

    // Any settlement still pending at shutdown is dropped, not leaked.
    settlements.abort_all();
    Ok(())
}
