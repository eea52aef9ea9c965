// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The aggregation context shared by request handlers.

use atrium_core::{AtriumError, DashboardContribution};
use atrium_plugin::Registries;
use tracing::info;

use crate::composer::{ComposedRoutes, compose_routes};
use crate::dashboard::DashboardResolver;
use crate::manifest::RouteManifest;

/// Frozen registries plus everything derived from them at startup.
///
/// Built once after plugin loading and shared read-only (typically behind an
/// `Arc`) for the rest of the process lifetime.
#[derive(Debug)]
pub struct SiteContext {
    registries: Registries,
    routes: ComposedRoutes,
    manifest: RouteManifest,
    dashboards: DashboardResolver,
}

impl SiteContext {
    /// Compose routes, compile the manifest, and prepare dashboard lookup.
    ///
    /// Fails only on configuration errors such as duplicate route ids.
    pub fn build(
        registries: Registries,
        default_dashboard: Option<DashboardContribution>,
    ) -> Result<Self, AtriumError> {
        let routes = compose_routes(registries.routes());
        let manifest = RouteManifest::compile(&routes)?;
        let dashboards = DashboardResolver::new(registries.dashboards(), default_dashboard);

        info!(
            routes = manifest.len(),
            dashboards = dashboards.dashboards().len(),
            "site context built"
        );

        Ok(Self {
            registries,
            routes,
            manifest,
            dashboards,
        })
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    pub fn routes(&self) -> &ComposedRoutes {
        &self.routes
    }

    pub fn manifest(&self) -> &RouteManifest {
        &self.manifest
    }

    pub fn dashboards(&self) -> &DashboardResolver {
        &self.dashboards
    }
}
