// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./atrium.toml` > `~/.config/atrium/atrium.toml` > `/etc/atrium/atrium.toml`
//! with environment variable overrides via `ATRIUM_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::AtriumConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/atrium/atrium.toml` (system-wide)
/// 3. `~/.config/atrium/atrium.toml` (user XDG config)
/// 4. `./atrium.toml` (local directory)
/// 5. `ATRIUM_*` environment variables
pub fn load_config() -> Result<AtriumConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<AtriumConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AtriumConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AtriumConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AtriumConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AtriumConfig::default()))
        .merge(Toml::file("/etc/atrium/atrium.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("atrium/atrium.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("atrium.toml"))
        .merge(env_provider())
}

/// Environment provider with an explicit section mapping.
///
/// `Env::split("_")` would turn `ATRIUM_SITE_PUBLIC_ORIGIN` into
/// `site.public.origin`; only the first underscore after a known section name
/// becomes a dot.
fn env_provider() -> Env {
    Env::prefixed("ATRIUM_").map(|key| {
        let key_str = key.as_str();
        let mapped = ["server", "site", "cache", "logging", "plugins"]
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or_else(|| key_str.to_string());
        mapped.into()
    })
}
