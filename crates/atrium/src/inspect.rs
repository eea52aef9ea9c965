// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Offline inspection commands: `routes`, `robots`, `sitemap`, `plugins`.

use std::fmt::Write as _;

use atrium_config::AtriumConfig;
use atrium_core::AtriumError;
use atrium_plugin::PluginRecord;
use atrium_routes::RouteManifest;
use atrium_seo::{render_sitemap_xml, synthesize_robots, synthesize_sitemap};

use crate::site::{build_site, offline_request};

/// Render the manifest as an aligned table of id, full path, and file.
pub fn format_manifest(manifest: &RouteManifest) -> String {
    let rows: Vec<(String, String, &str)> = manifest
        .entries()
        .iter()
        .map(|entry| {
            let path = manifest
                .full_path(&entry.id)
                .unwrap_or_else(|| "?".to_string());
            (entry.id.clone(), path, entry.file.as_str())
        })
        .collect();

    let id_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(0).max(2);
    let path_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(0).max(4);

    let mut out = String::new();
    let _ = writeln!(out, "{:<id_width$}  {:<path_width$}  FILE", "ID", "PATH");
    for (id, path, file) in &rows {
        let _ = writeln!(out, "{id:<id_width$}  {path:<path_width$}  {file}");
    }
    out
}

pub fn format_plugins(plugins: &[PluginRecord]) -> String {
    let mut out = String::new();
    for record in plugins {
        let _ = writeln!(
            out,
            "{} {} ({}): {}",
            record.manifest.name, record.manifest.version, record.status, record.manifest.description
        );
    }
    out
}

/// Runs `atrium routes`.
pub fn run_routes(config: &AtriumConfig, json: bool) -> Result<(), AtriumError> {
    let site = build_site(config)?;
    let manifest = site.context.manifest();
    if json {
        let rendered = serde_json::to_string_pretty(manifest.entries())
            .map_err(|e| AtriumError::Internal(format!("failed to serialize manifest: {e}")))?;
        println!("{rendered}");
    } else {
        print!("{}", format_manifest(manifest));
    }
    Ok(())
}

/// Runs `atrium robots`.
pub async fn run_robots(config: &AtriumConfig, origin: Option<&str>) -> Result<(), AtriumError> {
    let request = offline_request(config, origin)?;
    let site = build_site(config)?;
    println!("{}", synthesize_robots(site.context.registries(), &request).await);
    Ok(())
}

/// Runs `atrium sitemap`.
pub async fn run_sitemap(config: &AtriumConfig, origin: &str) -> Result<(), AtriumError> {
    let request = offline_request(config, Some(origin))?;
    let site = build_site(config)?;
    let urls = synthesize_sitemap(
        site.context.manifest(),
        site.context.registries(),
        &request,
        chrono::Utc::now(),
    )
    .await;
    println!("{}", render_sitemap_xml(&urls));
    Ok(())
}

/// Runs `atrium plugins`.
pub fn run_plugins(config: &AtriumConfig) -> Result<(), AtriumError> {
    let site = build_site(config)?;
    print!("{}", format_plugins(&site.plugins));
    Ok(())
}
