// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route tree primitives handed to route contributions.
//!
//! The shapes mirror a hierarchical router configuration: index routes,
//! path routes with optional children, pathless layouts, and a `prefix`
//! helper that rewrites the paths of a list of routes.

use serde::{Deserialize, Serialize};

/// One node of a route configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfigEntry {
    /// Explicit route id. When absent the id is derived from `file`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Path segment(s), relative to the parent unless it starts with `/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Index routes render at their parent's path and never have children.
    #[serde(default)]
    pub index: bool,
    /// Route module that renders this node.
    pub file: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteConfigEntry>,
}

impl RouteConfigEntry {
    /// Override the derived route id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// True when this node has no path and is not an index route.
    pub fn is_layout(&self) -> bool {
        !self.index && self.path.as_deref().is_none_or(str::is_empty)
    }
}

/// Route-building primitives passed to every route contribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteHelpers;

impl RouteHelpers {
    /// An index route rendered at its parent's path.
    pub fn index(&self, file: impl Into<String>) -> RouteConfigEntry {
        RouteConfigEntry {
            id: None,
            path: None,
            index: true,
            file: file.into(),
            children: Vec::new(),
        }
    }

    /// A route matching `path`, optionally with nested children.
    pub fn route(
        &self,
        path: impl Into<String>,
        file: impl Into<String>,
        children: Vec<RouteConfigEntry>,
    ) -> RouteConfigEntry {
        RouteConfigEntry {
            id: None,
            path: Some(path.into()),
            index: false,
            file: file.into(),
            children,
        }
    }

    /// A pathless layout wrapping `children`.
    pub fn layout(&self, file: impl Into<String>, children: Vec<RouteConfigEntry>) -> RouteConfigEntry {
        RouteConfigEntry {
            id: None,
            path: None,
            index: false,
            file: file.into(),
            children,
        }
    }

    /// Prefix the path of every route in `routes` with `prefix`.
    ///
    /// Index routes and path routes receive the joined path; pathless layouts
    /// are left in place and the prefix is pushed down into their children.
    pub fn prefix(&self, prefix: &str, routes: Vec<RouteConfigEntry>) -> Vec<RouteConfigEntry> {
        routes
            .into_iter()
            .map(|mut route| {
                let has_path = route.path.as_deref().is_some_and(|p| !p.is_empty());
                if route.index || has_path {
                    route.path = Some(match route.path.as_deref() {
                        Some(path) if !path.is_empty() => join_route_paths(prefix, path),
                        _ => prefix.to_string(),
                    });
                } else {
                    route.children = self.prefix(prefix, std::mem::take(&mut route.children));
                }
                route
            })
            .collect()
    }
}

/// Join two path fragments with exactly one `/` between them.
pub fn join_route_paths(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Whether `path` is `root` itself or lies below it on a segment boundary.
///
/// `/dashboard` and `/dashboard/shop` are within `/dashboard`; `/dashboards`
/// is not.
pub fn is_path_within(path: &str, root: &str) -> bool {
    let root = root.trim_end_matches('/');
    path.strip_prefix(root)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
