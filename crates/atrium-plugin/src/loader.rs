// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin loading: runs each plugin's registration function exactly once,
//! in load order, and commits its staged contributions to the registries.
//!
//! A plugin that returns an error or panics during registration is marked
//! `Failed` and contributes nothing; later plugins still load.

use std::collections::{BTreeMap, HashSet};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use atrium_core::{AtriumError, panic_message};
use tracing::{debug, info, warn};

use crate::manifest::PluginManifest;
use crate::registry::{Registrar, Registries};

/// A unit of extension that registers contributions at startup.
pub trait Plugin: Send + Sync {
    /// Identity of the plugin. `name` is used as the contribution source.
    fn manifest(&self) -> PluginManifest;

    /// Stage this plugin's contributions.
    fn register(&self, registrar: &mut Registrar) -> Result<(), AtriumError>;
}

/// Outcome of loading one plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginStatus {
    /// Registration succeeded and its contributions were committed.
    Enabled,
    /// Plugin is explicitly disabled in configuration.
    Disabled,
    /// Registration failed; nothing from this plugin was committed.
    Failed(String),
}

impl std::fmt::Display for PluginStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginStatus::Enabled => write!(f, "enabled"),
            PluginStatus::Disabled => write!(f, "disabled"),
            PluginStatus::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Status record for one plugin in a [`LoadReport`].
#[derive(Debug, Clone)]
pub struct PluginRecord {
    pub manifest: PluginManifest,
    pub status: PluginStatus,
}

/// Registries produced by a load, plus the status of every plugin seen.
#[derive(Debug)]
pub struct LoadReport {
    pub registries: Registries,
    pub plugins: Vec<PluginRecord>,
}

impl LoadReport {
    /// Status of the plugin called `name`, if it was seen.
    pub fn status(&self, name: &str) -> Option<&PluginStatus> {
        self.plugins
            .iter()
            .find(|p| p.manifest.name == name)
            .map(|p| &p.status)
    }

    pub fn enabled_count(&self) -> usize {
        self.plugins
            .iter()
            .filter(|p| p.status == PluginStatus::Enabled)
            .count()
    }
}

/// Ordered set of plugins to load.
#[derive(Default)]
pub struct PluginLoader {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plugin to the load order.
    pub fn with_plugin(mut self, plugin: Arc<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn add(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Manifests of every plugin, in load order.
    pub fn manifests(&self) -> Vec<PluginManifest> {
        self.plugins.iter().map(|p| p.manifest()).collect()
    }

    /// Run every plugin's registration function once, in load order.
    ///
    /// `overrides` maps plugin names to enabled flags; plugins absent from the
    /// map are enabled. A second plugin with an already-seen name is skipped.
    pub fn load(&self, overrides: &BTreeMap<String, bool>) -> LoadReport {
        let mut registries = Registries::new();
        let mut records = Vec::with_capacity(self.plugins.len());
        let mut seen = HashSet::new();

        for plugin in &self.plugins {
            let manifest = plugin.manifest();

            if let Err(e) = manifest.validate() {
                warn!(error = %e, "skipping plugin with invalid manifest");
                records.push(PluginRecord {
                    manifest,
                    status: PluginStatus::Failed(e.to_string()),
                });
                continue;
            }

            if !seen.insert(manifest.name.clone()) {
                warn!(plugin = %manifest.name, "duplicate plugin name, skipping");
                continue;
            }

            if overrides.get(&manifest.name) == Some(&false) {
                debug!(plugin = %manifest.name, "plugin disabled by configuration");
                records.push(PluginRecord {
                    manifest,
                    status: PluginStatus::Disabled,
                });
                continue;
            }

            let status = match register_plugin(plugin.as_ref(), &manifest.name) {
                Ok(registrar) => {
                    let summary = registries.commit(registrar);
                    debug!(
                        plugin = %manifest.name,
                        routes = summary.routes,
                        dashboards = summary.dashboards,
                        sitemaps = summary.sitemaps,
                        system_endpoints = summary.system_endpoints,
                        "plugin registered"
                    );
                    PluginStatus::Enabled
                }
                Err(e) => {
                    warn!(plugin = %manifest.name, error = %e, "plugin registration failed");
                    PluginStatus::Failed(e.to_string())
                }
            };
            records.push(PluginRecord { manifest, status });
        }

        let report = LoadReport {
            registries,
            plugins: records,
        };
        info!(
            plugins = report.plugins.len(),
            enabled = report.enabled_count(),
            "plugin loading complete"
        );
        report
    }
}

/// Run one plugin's registration into a fresh staging area.
fn register_plugin(plugin: &dyn Plugin, name: &str) -> Result<Registrar, AtriumError> {
    let mut registrar = Registrar::new(name);
    match catch_unwind(AssertUnwindSafe(|| plugin.register(&mut registrar))) {
        Ok(Ok(())) => Ok(registrar),
        Ok(Err(e)) => Err(e),
        Err(payload) => Err(AtriumError::contribution(
            name,
            format!("panicked during registration: {}", panic_message(payload.as_ref())),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_core::{ContributedRoutes, DashboardContribution, RouteHelpers};

    struct TestPlugin {
        name: &'static str,
        behavior: Behavior,
    }

    enum Behavior {
        Dashboard(&'static str),
        FailAfterStaging,
        Panic,
    }

    impl Plugin for TestPlugin {
        fn manifest(&self) -> PluginManifest {
            PluginManifest::new(self.name, "0.1.0", "test plugin")
        }

        fn register(&self, registrar: &mut Registrar) -> Result<(), AtriumError> {
            match self.behavior {
                Behavior::Dashboard(pathname) => {
                    registrar.register_dashboard(DashboardContribution {
                        name: self.name.to_string(),
                        logo: String::new(),
                        pathname: pathname.to_string(),
                        description: None,
                        sidebar: None,
                    });
                    Ok(())
                }
                Behavior::FailAfterStaging => {
                    registrar.register_routes(|h: &RouteHelpers| {
                        Ok::<_, AtriumError>(ContributedRoutes::public(vec![h.index("x.tsx")]))
                    });
                    Err(AtriumError::contribution(self.name, "missing data"))
                }
                Behavior::Panic => panic!("registration exploded"),
            }
        }
    }

    fn plugin(name: &'static str, behavior: Behavior) -> Arc<dyn Plugin> {
        Arc::new(TestPlugin { name, behavior })
    }

    #[test]
    fn loads_plugins_in_order() {
        let loader = PluginLoader::new()
            .with_plugin(plugin("a", Behavior::Dashboard("/dashboard/a")))
            .with_plugin(plugin("b", Behavior::Dashboard("/dashboard/b")));
        let report = loader.load(&BTreeMap::new());

        let sources: Vec<_> = report
            .registries
            .dashboards()
            .iter()
            .map(|r| r.source.as_str())
            .collect();
        assert_eq!(sources, vec!["a", "b"]);
        assert_eq!(report.enabled_count(), 2);
    }

    #[test]
    fn disabled_plugin_contributes_nothing() {
        let loader = PluginLoader::new()
            .with_plugin(plugin("a", Behavior::Dashboard("/dashboard/a")))
            .with_plugin(plugin("b", Behavior::Dashboard("/dashboard/b")));
        let overrides = BTreeMap::from([("a".to_string(), false)]);
        let report = loader.load(&overrides);

        assert_eq!(report.status("a"), Some(&PluginStatus::Disabled));
        assert_eq!(report.status("b"), Some(&PluginStatus::Enabled));
        assert_eq!(report.registries.dashboards().len(), 1);
    }

    #[test]
    fn failing_plugin_commits_no_partial_state() {
        let loader = PluginLoader::new()
            .with_plugin(plugin("broken", Behavior::FailAfterStaging))
            .with_plugin(plugin("ok", Behavior::Dashboard("/dashboard/ok")));
        let report = loader.load(&BTreeMap::new());

        assert!(matches!(report.status("broken"), Some(PluginStatus::Failed(_))));
        assert!(report.registries.routes().is_empty());
        assert_eq!(report.registries.dashboards().len(), 1);
    }

    #[test]
    fn panicking_plugin_is_isolated() {
        let loader = PluginLoader::new()
            .with_plugin(plugin("boom", Behavior::Panic))
            .with_plugin(plugin("ok", Behavior::Dashboard("/dashboard/ok")));
        let report = loader.load(&BTreeMap::new());

        match report.status("boom") {
            Some(PluginStatus::Failed(reason)) => {
                assert!(reason.contains("registration exploded"), "got: {reason}")
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(report.status("ok"), Some(&PluginStatus::Enabled));
    }

    #[test]
    fn duplicate_plugin_names_load_once() {
        let loader = PluginLoader::new()
            .with_plugin(plugin("a", Behavior::Dashboard("/dashboard/first")))
            .with_plugin(plugin("a", Behavior::Dashboard("/dashboard/second")));
        let report = loader.load(&BTreeMap::new());

        assert_eq!(report.plugins.len(), 1);
        let dashboards = report.registries.dashboards().get_all();
        assert_eq!(dashboards.len(), 1);
        assert_eq!(dashboards[0].contribution.pathname, "/dashboard/first");
    }

    #[test]
    #[tracing_test::traced_test]
    fn registration_failure_is_logged_with_plugin_name() {
        let loader = PluginLoader::new().with_plugin(plugin("broken", Behavior::FailAfterStaging));
        loader.load(&BTreeMap::new());
        assert!(logs_contain("plugin registration failed"));
        assert!(logs_contain("broken"));
    }

    #[test]
    fn invalid_manifest_is_reported() {
        let loader = PluginLoader::new().with_plugin(plugin("", Behavior::Dashboard("/x")));
        let report = loader.load(&BTreeMap::new());
        assert!(matches!(report.plugins[0].status, PluginStatus::Failed(_)));
        assert!(report.registries.dashboards().is_empty());
    }

    #[test]
    fn status_display() {
        assert_eq!(PluginStatus::Enabled.to_string(), "enabled");
        assert_eq!(PluginStatus::Disabled.to_string(), "disabled");
        assert_eq!(PluginStatus::Failed("x".into()).to_string(), "failed: x");
    }
}
