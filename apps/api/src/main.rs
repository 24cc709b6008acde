mod config;
mod corpus;
mod db;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::corpus::ExampleCorpus;
use crate::db::{create_pool, initialize};
use crate::llm_client::{LlmClient, Retrying};
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

    info!("Starting Postcraft v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite and make sure the tables exist
    let db = create_pool(&config.database_url).await?;
    initialize(&db).await?;
    info!("Database schema ready");

    let corpus = ExampleCorpus::load(config.examples_path.as_deref())?;

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!(
        "LLM client initialized (model: {}, max retries: {})",
        llm_client::MODEL,
        config.llm_max_retries
    );

    let state = AppState {
        db,
        corpus: Arc::new(corpus),
        generator: Arc::new(Retrying::new(llm, config.llm_max_retries)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
