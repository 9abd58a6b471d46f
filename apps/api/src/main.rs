mod catalog;
mod config;
mod errors;
mod llm_client;
mod models;
mod optimize;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::session::new_shared_session;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; a missing GEMINI_API_KEY fails here, before
    // any network attempt.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_directive(&config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailorbird API v{}", env!("CARGO_PKG_VERSION"));

    // Load the company/level/style catalog
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::builtin()?,
    };
    info!(
        "Catalog loaded: {} companies, {} levels, {} styles",
        catalog.companies.len(),
        catalog.levels.len(),
        catalog.styles.len()
    );

    // Initialize the Gemini client
    let llm = GeminiClient::new(config.gemini_api_key.clone())
        .context("Failed to initialize Gemini client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        catalog: Arc::new(catalog),
        session: new_shared_session(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // the SPA runs on another origin in dev

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Tracing targets use the crate's module path, which underscores the
/// hyphenated package name.
fn default_log_directive(rust_log: &str) -> String {
    format!(
        "{}={}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
        rust_log
    )
}
