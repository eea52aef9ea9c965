// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only contribution registries.
//!
//! Each contribution kind has its own `ContributionRegistry`, an ordered
//! list of `(source, contribution)` pairs. Registration order is the only
//! ordering the aggregators rely on. Plugins never write to the registries
//! directly: they fill a [`Registrar`] which the loader commits once the
//! plugin's registration function has returned successfully.

use std::fmt;
use std::sync::Arc;

use atrium_core::{
    DashboardContribution, RobotsContribution, RouteContribution, SitemapContribution,
    SystemEndpointContribution,
};

/// A contribution tagged with the plugin that registered it.
#[derive(Clone)]
pub struct Registered<T> {
    /// Name of the contributing plugin.
    pub source: String,
    pub contribution: T,
}

impl<T: fmt::Debug> fmt::Debug for Registered<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registered")
            .field("source", &self.source)
            .field("contribution", &self.contribution)
            .finish()
    }
}

/// Ordered, append-only store for one contribution kind.
///
/// Duplicates are permitted; there is no removal.
pub struct ContributionRegistry<T> {
    entries: Vec<Registered<T>>,
}

impl<T> ContributionRegistry<T> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a contribution at the end of the registry.
    pub fn register(&mut self, source: impl Into<String>, contribution: T) {
        self.entries.push(Registered {
            source: source.into(),
            contribution,
        });
    }

    /// All registered contributions, in registration order.
    pub fn get_all(&self) -> &[Registered<T>] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Registered<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for ContributionRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ContributionRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| e.source.as_str()))
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a ContributionRegistry<T> {
    type Item = &'a Registered<T>;
    type IntoIter = std::slice::Iter<'a, Registered<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Shared handle to a route contribution.
pub type RouteRegistration = Arc<dyn RouteContribution>;

/// The four contribution registries, populated once during plugin loading.
#[derive(Debug, Default)]
pub struct Registries {
    routes: ContributionRegistry<RouteRegistration>,
    dashboards: ContributionRegistry<DashboardContribution>,
    sitemaps: ContributionRegistry<SitemapContribution>,
    system_endpoints: ContributionRegistry<SystemEndpointContribution>,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> &ContributionRegistry<RouteRegistration> {
        &self.routes
    }

    pub fn dashboards(&self) -> &ContributionRegistry<DashboardContribution> {
        &self.dashboards
    }

    pub fn sitemaps(&self) -> &ContributionRegistry<SitemapContribution> {
        &self.sitemaps
    }

    pub fn system_endpoints(&self) -> &ContributionRegistry<SystemEndpointContribution> {
        &self.system_endpoints
    }

    /// Append everything staged in `registrar`, preserving its order.
    pub fn commit(&mut self, registrar: Registrar) -> RegistrationSummary {
        let Registrar {
            source,
            routes,
            dashboards,
            sitemaps,
            system_endpoints,
        } = registrar;

        let summary = RegistrationSummary {
            routes: routes.len(),
            dashboards: dashboards.len(),
            sitemaps: sitemaps.len(),
            system_endpoints: system_endpoints.len(),
        };

        for c in routes {
            self.routes.register(source.clone(), c);
        }
        for c in dashboards {
            self.dashboards.register(source.clone(), c);
        }
        for c in sitemaps {
            self.sitemaps.register(source.clone(), c);
        }
        for c in system_endpoints {
            self.system_endpoints.register(source.clone(), c);
        }
        summary
    }

    /// Every sitemap contribution: the sitemap registry first, then the
    /// `sitemap` fields of system endpoint contributions. Each part keeps
    /// registration order.
    pub fn sitemap_sources(&self) -> impl Iterator<Item = (&str, &SitemapContribution)> {
        let direct = self
            .sitemaps
            .iter()
            .map(|r| (r.source.as_str(), &r.contribution));
        let endpoints = self.system_endpoints.iter().filter_map(|r| {
            r.contribution
                .sitemap
                .as_ref()
                .map(|s| (r.source.as_str(), s))
        });
        direct.chain(endpoints)
    }

    /// Every robots contribution, in registration order.
    pub fn robots_sources(&self) -> impl Iterator<Item = (&str, &RobotsContribution)> {
        self.system_endpoints.iter().filter_map(|r| {
            r.contribution
                .robots
                .as_ref()
                .map(|c| (r.source.as_str(), c))
        })
    }
}

/// Counts of contributions committed for one plugin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrationSummary {
    pub routes: usize,
    pub dashboards: usize,
    pub sitemaps: usize,
    pub system_endpoints: usize,
}

impl RegistrationSummary {
    pub fn total(&self) -> usize {
        self.routes + self.dashboards + self.sitemaps + self.system_endpoints
    }
}

/// Staging area handed to a plugin during registration.
///
/// Nothing reaches the [`Registries`] until the loader commits the registrar,
/// so a plugin that fails halfway leaves no partial contributions behind.
pub struct Registrar {
    source: String,
    routes: Vec<RouteRegistration>,
    dashboards: Vec<DashboardContribution>,
    sitemaps: Vec<SitemapContribution>,
    system_endpoints: Vec<SystemEndpointContribution>,
}

impl Registrar {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            routes: Vec::new(),
            dashboards: Vec::new(),
            sitemaps: Vec::new(),
            system_endpoints: Vec::new(),
        }
    }

    /// Name of the plugin this registrar stages contributions for.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn register_routes<C>(&mut self, contribution: C) -> &mut Self
    where
        C: RouteContribution + 'static,
    {
        self.routes.push(Arc::new(contribution));
        self
    }

    pub fn register_dashboard(&mut self, dashboard: DashboardContribution) -> &mut Self {
        self.dashboards.push(dashboard);
        self
    }

    pub fn register_sitemap(&mut self, sitemap: impl Into<SitemapContribution>) -> &mut Self {
        self.sitemaps.push(sitemap.into());
        self
    }

    pub fn register_system_endpoints(
        &mut self,
        endpoints: SystemEndpointContribution,
    ) -> &mut Self {
        self.system_endpoints.push(endpoints);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
            && self.dashboards.is_empty()
            && self.sitemaps.is_empty()
            && self.system_endpoints.is_empty()
    }
}

impl fmt::Debug for Registrar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registrar")
            .field("source", &self.source)
            .field("routes", &self.routes.len())
            .field("dashboards", &self.dashboards.len())
            .field("sitemaps", &self.sitemaps.len())
            .field("system_endpoints", &self.system_endpoints.len())
            .finish()
    }
}
