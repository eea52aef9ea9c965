// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use atrium_cache::CoalescingCache;
use atrium_core::{AtriumError, PostPage, PostStore};
use atrium_routes::SiteContext;
use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::handlers;

/// Health state for the unauthenticated health endpoint.
#[derive(Debug, Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Per-site settings the handlers need at request time.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    /// Display name of the site.
    pub name: String,
    /// Overrides the request-derived origin when set.
    pub public_origin: Option<Url>,
    /// `max-age` sent with the sitemap.
    pub sitemap_max_age_secs: u64,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: "atrium".to_string(),
            public_origin: None,
            sitemap_max_age_secs: 3600,
        }
    }
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Frozen registries and everything derived from them.
    pub site: Arc<SiteContext>,
    /// Backing store for listings.
    pub posts: Arc<dyn PostStore>,
    /// Coalescing cache in front of `posts`.
    pub listings: CoalescingCache<PostPage>,
    pub settings: SiteSettings,
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(
        site: Arc<SiteContext>,
        posts: Arc<dyn PostStore>,
        settings: SiteSettings,
        listing_ttl: Duration,
    ) -> Self {
        Self {
            site,
            posts,
            listings: CoalescingCache::new(listing_ttl),
            settings,
            health: HealthState {
                start_time: std::time::Instant::now(),
            },
        }
    }
}

/// Gateway server configuration (mirrors the `[server]` config section).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the router with every gateway route:
/// - GET /sitemap.xml
/// - GET /robots.txt
/// - GET /health
/// - GET /api/posts
/// - GET /api/dashboard
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/sitemap.xml", get(handlers::get_sitemap))
        .route("/robots.txt", get(handlers::get_robots))
        .route("/health", get(handlers::get_health))
        .route("/api/posts", get(handlers::get_posts))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind to the configured host:port and serve until `shutdown` resolves.
pub async fn start_server<S>(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: S,
) -> Result<(), AtriumError>
where
    S: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AtriumError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| AtriumError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}
