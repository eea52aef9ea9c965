// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `atrium serve` command implementation.
//!
//! Loads the built-in plugins, freezes the registries into a site context,
//! and serves it over HTTP until Ctrl-C.

use std::time::Duration;

use atrium_config::AtriumConfig;
use atrium_core::AtriumError;
use atrium_gateway::{GatewayState, ServerConfig, start_server};
use tracing::{info, warn};

use crate::site::{build_site, site_settings};

/// Runs the `atrium serve` command.
pub async fn run_serve(config: AtriumConfig) -> Result<(), AtriumError> {
    init_tracing(&config.logging.level);

    info!(site = %config.site.name, "starting atrium serve");

    let site = build_site(&config)?;
    let settings = site_settings(&config)?;
    let listing_ttl = Duration::from_millis(config.cache.listing_ttl_ms);

    let state = GatewayState::new(site.context, site.posts, settings, listing_ttl);
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    start_server(&server_config, state, shutdown_signal()).await?;

    info!("atrium serve shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl-C, shutting down"),
        Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
    }
}

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("atrium={log_level},warn")));

    // A second init (tests, embedded use) is not an error worth reporting.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}
