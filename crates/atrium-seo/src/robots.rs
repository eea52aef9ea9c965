// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! robots.txt synthesis.
//!
//! Fragments from every contribution are merged into one canonical group per
//! user agent. Merging is order-independent: the same set of fragments always
//! renders to the same text.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use atrium_core::{RequestContext, RobotsFragment};
use atrium_plugin::Registries;
use tracing::{debug, warn};

use crate::resolve::resolve_guarded;

/// Wildcard user agent, rendered after every named agent.
pub const WILDCARD_AGENT: &str = "*";

/// Merged rules for one user agent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalGroup {
    pub user_agent: String,
    pub allow: BTreeSet<String>,
    pub disallow: BTreeSet<String>,
    pub crawl_delay: Option<f64>,
}

/// Result of merging robots fragments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedRobots {
    /// Groups in output order: named agents lexicographically, `*` last.
    pub groups: Vec<CanonicalGroup>,
    pub sitemaps: BTreeSet<String>,
}

/// Merge robots fragments into canonical per-agent groups.
pub fn merge_robots_configs<'a, I>(configs: I) -> MergedRobots
where
    I: IntoIterator<Item = &'a RobotsFragment>,
{
    let mut groups: BTreeMap<String, CanonicalGroup> = BTreeMap::new();
    let mut sitemaps = BTreeSet::new();

    for fragment in configs {
        sitemaps.extend(
            fragment
                .sitemaps
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );

        for group in &fragment.groups {
            let delay = group.crawl_delay.filter(|d| {
                let valid = d.is_finite() && *d >= 0.0;
                if !valid {
                    warn!(crawl_delay = d, "ignoring invalid crawl-delay");
                }
                valid
            });

            for agent in group.user_agents.iter().map(|a| a.trim()) {
                if agent.is_empty() {
                    continue;
                }
                let canonical = groups
                    .entry(agent.to_string())
                    .or_insert_with(|| CanonicalGroup {
                        user_agent: agent.to_string(),
                        ..CanonicalGroup::default()
                    });
                canonical.allow.extend(group.allow.iter().filter_map(|p| normalize_rule_path(p)));
                canonical
                    .disallow
                    .extend(group.disallow.iter().filter_map(|p| normalize_rule_path(p)));
                if let Some(incoming) = delay {
                    canonical.crawl_delay = Some(canonical.crawl_delay.unwrap_or(0.0).max(incoming));
                }
            }
        }
    }

    let wildcard = groups.remove(WILDCARD_AGENT);
    let mut ordered: Vec<CanonicalGroup> = groups.into_values().collect();
    ordered.extend(wildcard);

    MergedRobots {
        groups: ordered,
        sitemaps,
    }
}

/// Trim a rule path, drop it if empty, and make it absolute.
pub fn normalize_rule_path(path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        None
    } else if path.starts_with('/') {
        Some(path.to_string())
    } else {
        Some(format!("/{path}"))
    }
}

/// Render merged rules as robots.txt text.
pub fn render_robots(merged: &MergedRobots) -> String {
    let mut out = String::new();
    for group in &merged.groups {
        let _ = writeln!(out, "User-agent: {}", group.user_agent);
        for path in &group.allow {
            let _ = writeln!(out, "Allow: {path}");
        }
        for path in &group.disallow {
            let _ = writeln!(out, "Disallow: {path}");
        }
        if let Some(delay) = group.crawl_delay {
            let _ = writeln!(out, "Crawl-delay: {delay}");
        }
        out.push('\n');
    }
    for sitemap in &merged.sitemaps {
        let _ = writeln!(out, "Sitemap: {sitemap}");
    }
    out.truncate(out.trim_end().len());
    out
}

/// Resolve every robots contribution for `request` and render the result.
pub async fn synthesize_robots(registries: &Registries, request: &RequestContext) -> String {
    let mut fragments = Vec::new();
    for (source, contribution) in registries.robots_sources() {
        if let Some(fragment) = resolve_guarded(source, "robots", contribution, request).await {
            fragments.push(fragment);
        }
    }
    let merged = merge_robots_configs(&fragments);
    debug!(
        fragments = fragments.len(),
        groups = merged.groups.len(),
        sitemaps = merged.sitemaps.len(),
        "robots.txt synthesized"
    );
    render_robots(&merged)
}
