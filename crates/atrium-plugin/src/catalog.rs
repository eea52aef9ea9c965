// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in plugin catalog.
//!
//! Load order is fixed: `core`, `blog`, `shop`, `assets`. Registration order
//! follows it, which in turn fixes route, sitemap and dashboard ordering.

use std::sync::Arc;

use atrium_core::PostStore;

use crate::builtin::{AssetsPlugin, BlogPlugin, CorePlugin, ShopPlugin};
use crate::loader::{Plugin, PluginLoader};
use crate::manifest::PluginManifest;

/// Returns every built-in plugin in load order.
pub fn builtin_plugins(posts: Arc<dyn PostStore>) -> Vec<Arc<dyn Plugin>> {
    vec![
        Arc::new(CorePlugin),
        Arc::new(BlogPlugin::new(posts)),
        Arc::new(ShopPlugin),
        Arc::new(AssetsPlugin),
    ]
}

/// A loader preloaded with the built-in plugins.
pub fn builtin_loader(posts: Arc<dyn PostStore>) -> PluginLoader {
    builtin_plugins(posts)
        .into_iter()
        .fold(PluginLoader::new(), PluginLoader::with_plugin)
}

/// Returns manifests for all built-in plugins.
pub fn builtin_catalog() -> Vec<PluginManifest> {
    builtin_plugins(Arc::new(crate::builtin::MemoryPostStore::default()))
        .iter()
        .map(|p| p.manifest())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn catalog_has_four_plugins_in_order() {
        let names: Vec<_> = builtin_catalog().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["core", "blog", "shop", "assets"]);
    }

    #[test]
    fn all_manifests_valid() {
        for manifest in builtin_catalog() {
            assert!(manifest.validate().is_ok(), "{} invalid", manifest.name);
            assert!(!manifest.description.is_empty());
        }
    }

    #[test]
    fn builtin_loader_enables_everything_by_default() {
        let report = builtin_loader(Arc::new(crate::builtin::MemoryPostStore::default()))
            .load(&BTreeMap::new());
        assert_eq!(report.enabled_count(), 4);
        assert_eq!(report.registries.routes().len(), 4);
        assert_eq!(report.registries.dashboards().len(), 3);
        assert_eq!(report.registries.system_endpoints().len(), 3);
    }
}
