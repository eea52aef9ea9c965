// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup assembly shared by every subcommand: post store, plugin loading,
//! and the site context.

use std::sync::Arc;

use atrium_config::AtriumConfig;
use atrium_core::{AtriumError, PostStore, PostSummary, RequestContext};
use atrium_gateway::SiteSettings;
use atrium_plugin::builtin::{MemoryPostStore, default_dashboard};
use atrium_plugin::{PluginRecord, PluginStatus, builtin_loader};
use atrium_routes::SiteContext;
use tracing::{info, warn};
use url::Url;

/// Everything built from configuration before the first request.
pub struct Site {
    pub context: Arc<SiteContext>,
    pub posts: Arc<dyn PostStore>,
    pub plugins: Vec<PluginRecord>,
}

/// Seed the in-memory post store with the configured published posts.
pub fn post_store(config: &AtriumConfig) -> MemoryPostStore {
    let posts = config
        .blog
        .posts
        .iter()
        .filter(|seed| seed.published)
        .map(|seed| PostSummary {
            slug: seed.slug.clone(),
            title: seed.title.clone(),
            updated_at: seed.updated_at,
        })
        .collect();
    MemoryPostStore::new(posts)
}

/// Load the built-in plugins with the configured overrides and build the
/// site context.
pub fn build_site(config: &AtriumConfig) -> Result<Site, AtriumError> {
    let posts: Arc<dyn PostStore> = Arc::new(post_store(config));
    let report = builtin_loader(Arc::clone(&posts)).load(&config.plugins);

    for record in &report.plugins {
        if let PluginStatus::Failed(reason) = &record.status {
            warn!(plugin = %record.manifest.name, reason = %reason, "plugin failed to load");
        }
    }
    info!(
        enabled = report.enabled_count(),
        total = report.plugins.len(),
        "plugins loaded"
    );

    let context = SiteContext::build(report.registries, Some(default_dashboard()))?;
    Ok(Site {
        context: Arc::new(context),
        posts,
        plugins: report.plugins,
    })
}

fn parse_origin(raw: &str) -> Result<Url, AtriumError> {
    Url::parse(raw).map_err(|e| AtriumError::Config(format!("invalid origin `{raw}`: {e}")))
}

/// Gateway settings from the `[site]` section.
pub fn site_settings(config: &AtriumConfig) -> Result<SiteSettings, AtriumError> {
    let public_origin = config
        .site
        .public_origin
        .as_deref()
        .map(parse_origin)
        .transpose()?;
    Ok(SiteSettings {
        name: config.site.name.clone(),
        public_origin,
        sitemap_max_age_secs: config.site.sitemap_max_age_secs,
    })
}

/// Request context for offline rendering.
///
/// Falls back to the configured public origin, then to the listen address.
pub fn offline_request(config: &AtriumConfig, origin: Option<&str>) -> Result<RequestContext, AtriumError> {
    let origin = match (origin, config.site.public_origin.as_deref()) {
        (Some(origin), _) | (None, Some(origin)) => origin.to_string(),
        (None, None) => format!("http://{}:{}", config.server.host, config.server.port),
    };
    RequestContext::new(parse_origin(&origin)?)
}
