// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sitemap synthesis.
//!
//! The sitemap is the origin root, then every indexable static route from the
//! compiled manifest, then every contributed URL in registration order. No
//! deduplication is done across those three sources.

use std::collections::HashSet;
use std::fmt::Write as _;

use atrium_core::{RequestContext, SitemapUrl, is_path_within};
use atrium_plugin::Registries;
use atrium_routes::RouteManifest;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::resolve::resolve_guarded;

/// XML namespace of the sitemap protocol.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Route subtrees never listed in the sitemap, matched on segment boundaries.
const EXCLUDED_PREFIXES: &[&str] = &["/dashboard", "/api"];

/// Paths of the system endpoints themselves.
const EXCLUDED_PATHS: &[&str] = &["/sitemap.xml", "/robots.txt"];

/// Whether a route path may be listed: no dynamic or catch-all segments, not
/// under an excluded prefix, not a system endpoint.
pub fn is_indexable_path(path: &str) -> bool {
    let dynamic = path
        .split('/')
        .any(|segment| segment.starts_with(':') || segment.contains('*'));
    !dynamic
        && !EXCLUDED_PREFIXES.iter().any(|root| is_path_within(path, root))
        && !EXCLUDED_PATHS.contains(&path)
}

/// Sitemap entries for the static routes of `manifest`, in manifest order.
///
/// The root path is skipped (the origin root entry covers it) and a path
/// reached by several routes, such as a layout and its index, is listed once.
pub fn manifest_urls(manifest: &RouteManifest, origin: &str, now: DateTime<Utc>) -> Vec<SitemapUrl> {
    let mut seen = HashSet::new();
    manifest
        .entries()
        .iter()
        .filter_map(|entry| manifest.full_path(&entry.id))
        .filter(|path| path != "/" && is_indexable_path(path))
        .filter(|path| seen.insert(path.clone()))
        .map(|path| SitemapUrl::new(format!("{origin}{path}")).with_lastmod(now))
        .collect()
}

/// Make a contributed `loc` absolute against `origin`.
///
/// `/blog` and `blog` both become `{origin}/blog`; a `loc` already starting
/// with the origin is kept.
pub fn normalize_loc(loc: &str, origin: &str) -> String {
    if loc.starts_with('/') {
        format!("{origin}{loc}")
    } else if !loc.starts_with(origin) {
        format!("{origin}/{loc}")
    } else {
        loc.to_string()
    }
}

/// Build the full list of sitemap entries for `request`.
///
/// Contributions are resolved sequentially in registration order; a failing
/// contribution contributes nothing.
pub async fn synthesize_sitemap(
    manifest: &RouteManifest,
    registries: &Registries,
    request: &RequestContext,
    now: DateTime<Utc>,
) -> Vec<SitemapUrl> {
    let origin = request.origin();

    let mut urls = vec![SitemapUrl::new(format!("{origin}/")).with_lastmod(now)];
    urls.extend(manifest_urls(manifest, &origin, now));
    let from_routes = urls.len() - 1;

    for (source, contribution) in registries.sitemap_sources() {
        let Some(contributed) = resolve_guarded(source, "sitemap", contribution, request).await
        else {
            continue;
        };
        debug!(source = %source, count = contributed.len(), "sitemap contribution resolved");
        urls.extend(contributed.into_iter().map(|mut url| {
            url.loc = normalize_loc(&url.loc, &origin);
            url.lastmod.get_or_insert(now);
            url
        }));
    }

    debug!(
        total = urls.len(),
        from_routes,
        "sitemap synthesized"
    );
    urls
}

/// Serialize entries as a sitemap `<urlset>` document without insignificant
/// whitespace.
pub fn render_sitemap_xml(urls: &[SitemapUrl]) -> String {
    let mut xml = String::with_capacity(128 + urls.len() * 128);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = write!(xml, r#"<urlset xmlns="{SITEMAP_NAMESPACE}">"#);
    for url in urls {
        xml.push_str("<url><loc>");
        xml.push_str(&escape_xml(&url.loc));
        xml.push_str("</loc>");
        if let Some(lastmod) = url.lastmod {
            let _ = write!(
                xml,
                "<lastmod>{}</lastmod>",
                lastmod.to_rfc3339_opts(SecondsFormat::Millis, true)
            );
        }
        if let Some(changefreq) = url.changefreq {
            let _ = write!(xml, "<changefreq>{changefreq}</changefreq>");
        }
        if let Some(priority) = url.priority.filter(|p| *p != 0.0) {
            let _ = write!(xml, "<priority>{priority}</priority>");
        }
        xml.push_str("</url>");
    }
    xml.push_str("</urlset>");
    xml
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
