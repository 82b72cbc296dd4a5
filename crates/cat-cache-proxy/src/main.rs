//! cat-cache-proxy - read-through cache for http.cat images
//!
//! Serves `{cache}/{code}.jpeg` when present and otherwise fetches the
//! image from the upstream, stores it and returns it.

use cat_cache_proxy::{start_server, Args, Result, ServerState, SharedState};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Usage errors exit here, before anything else runs
    let config = Args::parse().into_config();

    // Initialize logging
    let env_filter =
        EnvFilter::from_default_env().add_directive("cat_cache_proxy=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting cat-cache-proxy...");
    info!("Cache dir: {:?}", config.cache_dir);
    info!("Upstream: {}", config.upstream_url);

    let state = ServerState::from_config(&config)?;
    if let Err(e) = state.cache.init().await {
        error!(cache_dir = ?config.cache_dir, error = %e, "Failed to create cache directory");
        return Err(e.into());
    }

    let state: SharedState = Arc::new(state);

    start_server(state, &config.host, config.port).await?;

    Ok(())
}
