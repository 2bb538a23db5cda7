use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matchmaker::config::Config;
use matchmaker::nlp::keywords::load_keyword_dictionary;
use matchmaker::routes::build_router;
use matchmaker::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Matchmaker API v{}", env!("CARGO_PKG_VERSION"));

    // The extractor cannot run without categories: a bad dictionary aborts startup.
    let dictionary = load_keyword_dictionary(&config.keywords_path).with_context(|| {
        format!(
            "Failed to load keyword dictionary from '{}'",
            config.keywords_path
        )
    })?;

    let state = AppState::new(dictionary, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
