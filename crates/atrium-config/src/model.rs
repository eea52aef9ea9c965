// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Atrium site framework.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level Atrium configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AtriumConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Site identity and system endpoint settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Listing cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Per-plugin enable flags keyed by plugin name. Plugins not listed are enabled.
    #[serde(default)]
    pub plugins: BTreeMap<String, bool>,

    /// Blog plugin settings.
    #[serde(default)]
    pub blog: BlogConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Site identity and system endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Display name of the site.
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Canonical origin (e.g. `https://example.com`). When unset the origin is
    /// derived from each request's `Host` and forwarding headers.
    #[serde(default)]
    pub public_origin: Option<String>,

    /// `max-age` sent with `/sitemap.xml`.
    #[serde(default = "default_sitemap_max_age_secs")]
    pub sitemap_max_age_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            public_origin: None,
            sitemap_max_age_secs: default_sitemap_max_age_secs(),
        }
    }
}

fn default_site_name() -> String {
    "atrium".to_string()
}

fn default_sitemap_max_age_secs() -> u64 {
    3600
}

/// Listing cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Time-to-live of cached listing pages, in milliseconds.
    #[serde(default = "default_listing_ttl_ms")]
    pub listing_ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            listing_ttl_ms: default_listing_ttl_ms(),
        }
    }
}

fn default_listing_ttl_ms() -> u64 {
    60_000
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Blog plugin configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BlogConfig {
    /// Posts loaded into the in-memory post store at startup.
    #[serde(default)]
    pub posts: Vec<PostSeed>,
}

/// One seeded blog post.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PostSeed {
    /// URL slug, unique across posts.
    pub slug: String,

    /// Post title.
    pub title: String,

    /// Unpublished posts are excluded from listings and the sitemap.
    #[serde(default = "default_published")]
    pub published: bool,

    /// Last modification time (RFC 3339).
    pub updated_at: DateTime<Utc>,
}

fn default_published() -> bool {
    true
}
