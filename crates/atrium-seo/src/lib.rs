// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sitemap and robots.txt synthesis for the Atrium site framework.
//!
//! Both documents are built per request from the frozen contribution
//! registries. Each contribution is resolved in isolation: one failing plugin
//! removes its own entries and nothing else.

pub mod resolve;
pub mod robots;
pub mod sitemap;

pub use resolve::resolve_guarded;
pub use robots::{
    CanonicalGroup, MergedRobots, merge_robots_configs, normalize_rule_path, render_robots,
    synthesize_robots,
};
pub use sitemap::{
    SITEMAP_NAMESPACE, is_indexable_path, manifest_urls, normalize_loc, render_sitemap_xml,
    synthesize_sitemap,
};
