// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compiled route manifest: the composed route trees flattened under a
//! `root` route into `id -> { path, parent_id, index, file }`.

use std::collections::{HashMap, HashSet};

use atrium_core::{AtriumError, RouteConfigEntry};
use serde::Serialize;

use crate::composer::ComposedRoutes;

/// Id of the synthetic route that parents every top-level route.
pub const ROOT_ROUTE_ID: &str = "root";

const ROOT_ROUTE_FILE: &str = "root.tsx";

/// One flattened route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub id: String,
    /// Path segment relative to the parent, or absolute if it starts with `/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub index: bool,
    pub file: String,
}

/// Route ids in compile order (depth-first, public tree before dashboard).
#[derive(Debug, Clone, Default)]
pub struct RouteManifest {
    entries: Vec<ManifestEntry>,
    by_id: HashMap<String, usize>,
}

impl RouteManifest {
    /// Flatten the composed trees. Duplicate route ids are a configuration
    /// error.
    pub fn compile(routes: &ComposedRoutes) -> Result<Self, AtriumError> {
        let mut entries = vec![ManifestEntry {
            id: ROOT_ROUTE_ID.to_string(),
            path: Some(String::new()),
            parent_id: None,
            index: false,
            file: ROOT_ROUTE_FILE.to_string(),
        }];
        flatten(&routes.public, ROOT_ROUTE_ID, &mut entries);
        flatten(&routes.dashboard, ROOT_ROUTE_ID, &mut entries);
        Self::from_entries(entries)
    }

    /// Build a manifest from already-flat entries.
    pub fn from_entries(entries: Vec<ManifestEntry>) -> Result<Self, AtriumError> {
        let mut by_id = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if let Some(previous) = by_id.insert(entry.id.clone(), i) {
                return Err(AtriumError::Config(format!(
                    "duplicate route id `{}` (files `{}` and `{}`)",
                    entry.id, entries[previous].file, entry.file
                )));
            }
        }
        Ok(Self { entries, by_id })
    }

    pub fn get(&self, id: &str) -> Option<&ManifestEntry> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full URL path of route `id`, reconstructed by following parent links
    /// and joining segments root-to-leaf. An absolute segment replaces
    /// everything before it.
    ///
    /// Returns `None` for unknown ids, dangling parents and parent cycles.
    pub fn full_path(&self, id: &str) -> Option<String> {
        let mut segments = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(id);

        while let Some(route_id) = current {
            if !visited.insert(route_id) {
                return None;
            }
            let entry = self.get(route_id)?;
            if let Some(path) = entry.path.as_deref() {
                segments.push(path);
            }
            current = entry.parent_id.as_deref();
        }

        let mut full = String::new();
        for segment in segments.into_iter().rev() {
            let segment = segment.trim_end_matches('/');
            if segment.starts_with('/') {
                full = segment.to_string();
            } else if !segment.is_empty() {
                full.push('/');
                full.push_str(segment);
            }
        }
        if full.is_empty() {
            full.push('/');
        }
        Some(full)
    }
}

fn flatten(routes: &[RouteConfigEntry], parent_id: &str, out: &mut Vec<ManifestEntry>) {
    for route in routes {
        let id = route
            .id
            .clone()
            .unwrap_or_else(|| route_id_for_file(&route.file));
        out.push(ManifestEntry {
            id: id.clone(),
            path: route.path.clone().filter(|p| !p.is_empty()),
            parent_id: Some(parent_id.to_string()),
            index: route.index,
            file: route.file.clone(),
        });
        flatten(&route.children, &id, out);
    }
}

/// Route id derived from a module file: the path without its extension.
pub fn route_id_for_file(file: &str) -> String {
    let file = file.trim_start_matches("./");
    match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => stem.to_string(),
        _ => file.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::RouteHelpers;

    fn entry(id: &str, path: Option<&str>, parent: Option<&str>) -> ManifestEntry {
        ManifestEntry {
            id: id.to_string(),
            path: path.map(str::to_string),
            parent_id: parent.map(str::to_string),
            index: false,
            file: format!("{id}.tsx"),
        }
    }

    #[test]
    fn route_ids_strip_extension() {
        assert_eq!(route_id_for_file("routes/blog/post.tsx"), "routes/blog/post");
        assert_eq!(route_id_for_file("./routes/home.tsx"), "routes/home");
        assert_eq!(route_id_for_file("routes/v1.2/page"), "routes/v1.2/page");
        assert_eq!(route_id_for_file("README"), "README");
    }

    #[test]
    fn compile_flattens_depth_first_under_root() {
        let h = RouteHelpers;
        let routes = ComposedRoutes {
            public: vec![h.route(
                "blog",
                "routes/blog/layout.tsx",
                vec![h.index("routes/blog/index.tsx")],
            )],
            dashboard: vec![h.route("/dashboard", "routes/dashboard/home.tsx", vec![])],
        };
        let manifest = RouteManifest::compile(&routes).unwrap();
        let ids: Vec<_> = manifest.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "root",
                "routes/blog/layout",
                "routes/blog/index",
                "routes/dashboard/home"
            ]
        );
        let index = manifest.get("routes/blog/index").unwrap();
        assert!(index.index);
        assert_eq!(index.parent_id.as_deref(), Some("routes/blog/layout"));
        assert_eq!(manifest.full_path("routes/blog/index").as_deref(), Some("/blog"));
        assert_eq!(
            manifest.full_path("routes/dashboard/home").as_deref(),
            Some("/dashboard")
        );
        assert_eq!(manifest.full_path(ROOT_ROUTE_ID).as_deref(), Some("/"));
    }

    #[test]
    fn duplicate_ids_are_a_config_error() {
        let h = RouteHelpers;
        let routes = ComposedRoutes {
            public: vec![
                h.route("a", "routes/page.tsx", vec![]),
                h.route("b", "routes/page.tsx", vec![]),
            ],
            dashboard: vec![],
        };
        let err = RouteManifest::compile(&routes).unwrap_err();
        assert!(matches!(err, AtriumError::Config(ref m) if m.contains("routes/page")));
    }

    #[test]
    fn explicit_ids_disambiguate_shared_files() {
        let h = RouteHelpers;
        let routes = ComposedRoutes {
            public: vec![
                h.route("a", "routes/page.tsx", vec![]),
                h.route("b", "routes/page.tsx", vec![]).with_id("page-b"),
            ],
            dashboard: vec![],
        };
        let manifest = RouteManifest::compile(&routes).unwrap();
        assert_eq!(manifest.full_path("page-b").as_deref(), Some("/b"));
    }

    #[test]
    fn full_path_joins_nested_segments() {
        let manifest = RouteManifest::from_entries(vec![
            entry("root", Some(""), None),
            entry("shop", Some("shop/"), Some("root")),
            entry("product", Some("products/:handle"), Some("shop")),
            entry("layout", None, Some("shop")),
            entry("cart", Some("cart"), Some("layout")),
        ])
        .unwrap();
        assert_eq!(
            manifest.full_path("product").as_deref(),
            Some("/shop/products/:handle")
        );
        assert_eq!(manifest.full_path("cart").as_deref(), Some("/shop/cart"));
        assert_eq!(manifest.full_path("missing"), None);
    }

    #[test]
    fn full_path_guards_against_cycles() {
        let manifest = RouteManifest::from_entries(vec![
            entry("a", Some("a"), Some("b")),
            entry("b", Some("b"), Some("a")),
        ])
        .unwrap();
        assert_eq!(manifest.full_path("a"), None);
    }

    #[test]
    fn manifest_serializes_for_display() {
        let manifest = RouteManifest::from_entries(vec![entry("root", Some(""), None)]).unwrap();
        let json = serde_json::to_value(manifest.entries()).unwrap();
        assert_eq!(json[0]["id"], "root");
        assert!(json[0].get("parent_id").is_none());
    }
}
