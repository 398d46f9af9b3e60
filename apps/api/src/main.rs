mod analysis;
mod config;
mod errors;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::catalog::RoleCatalog;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Load role catalog (bundled unless ROLE_CATALOG_PATH overrides it)
    let catalog = load_catalog(&config)?;
    if catalog.is_empty() {
        warn!("Role catalog is empty; every analysis will report no matches");
    }
    info!("Role catalog loaded: {} roles", catalog.len());

    let state = AppState {
        config: config.clone(),
        catalog: Arc::new(catalog),
    };

    // Browser frontends upload from arbitrary origins.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn load_catalog(config: &Config) -> Result<RoleCatalog> {
    match &config.role_catalog_path {
        Some(path) => {
            info!("Loading role catalog from {}", path.display());
            RoleCatalog::from_path(path)
                .with_context(|| format!("Invalid role catalog at {}", path.display()))
        }
        None => RoleCatalog::builtin().context("Bundled role catalog is invalid"),
    }
}
