// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `core` plugin: site shell routes, dashboard home, and the baseline
//! robots policy.

use atrium_core::{
    AtriumError, ContributedRoutes, DashboardContribution, RequestContext, RobotsContribution,
    RobotsFragment, RobotsGroup, RouteHelpers, Sidebar, SidebarItem, SystemEndpointContribution,
};

use crate::loader::Plugin;
use crate::manifest::PluginManifest;
use crate::registry::Registrar;

/// Site shell, dashboard home, and default robots rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn manifest(&self) -> PluginManifest {
        PluginManifest::new(
            "core",
            env!("CARGO_PKG_VERSION"),
            "Home and about pages, dashboard home, baseline robots.txt",
        )
    }

    fn register(&self, registrar: &mut Registrar) -> Result<(), AtriumError> {
        registrar
            .register_routes(core_routes)
            .register_system_endpoints(SystemEndpointContribution::robots(
                RobotsContribution::from_fn(core_robots),
            ));
        Ok(())
    }
}

fn core_routes(h: &RouteHelpers) -> Result<ContributedRoutes, AtriumError> {
    let public = vec![h.layout(
        "routes/site/layout.tsx",
        vec![
            h.index("routes/site/home.tsx"),
            h.route("about", "routes/site/about.tsx", vec![]),
            h.route("sitemap.xml", "routes/system/sitemap.ts", vec![]),
            h.route("robots.txt", "routes/system/robots.ts", vec![]),
            h.route("api/health", "routes/api/health.ts", vec![]),
        ],
    )];
    let dashboard = vec![
        h.index("routes/dashboard/home.tsx"),
        h.route("settings", "routes/dashboard/settings.tsx", vec![]),
    ];
    Ok(ContributedRoutes::public(public).with_dashboard(dashboard))
}

/// Keep crawlers out of the admin area and the JSON API, and point them at
/// the sitemap on the requesting origin.
fn core_robots(request: &RequestContext) -> Result<RobotsFragment, AtriumError> {
    Ok(RobotsFragment {
        groups: vec![
            RobotsGroup::for_agent("*")
                .allow("/")
                .disallow("/dashboard")
                .disallow("/api"),
        ],
        sitemaps: vec![format!("{}/sitemap.xml", request.origin())],
    })
}

/// The dashboard selected when no registered dashboard matches.
pub fn default_dashboard() -> DashboardContribution {
    DashboardContribution {
        name: "Atrium".to_string(),
        logo: "/assets/atrium.svg".to_string(),
        pathname: "/dashboard".to_string(),
        description: Some("Site administration".to_string()),
        sidebar: Some(Sidebar {
            primary: vec![SidebarItem::new("Home", "/dashboard").with_icon("home")],
            secondary: vec![SidebarItem::new("Settings", "/dashboard/settings").with_icon("settings")],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn robots_points_at_request_origin() {
        let req = RequestContext::parse("https://example.com/robots.txt").unwrap();
        let fragment = RobotsContribution::from_fn(core_robots)
            .resolve(&req)
            .await
            .unwrap();
        assert_eq!(fragment.sitemaps, vec!["https://example.com/sitemap.xml"]);
        assert_eq!(fragment.groups[0].disallow, vec!["/dashboard", "/api"]);
    }

    #[test]
    fn registers_routes_and_robots() {
        let mut registrar = Registrar::new("core");
        CorePlugin.register(&mut registrar).unwrap();
        let mut registries = crate::registry::Registries::new();
        let summary = registries.commit(registrar);
        assert_eq!(summary.routes, 1);
        assert_eq!(summary.system_endpoints, 1);
        assert_eq!(summary.dashboards, 0);
    }

    #[test]
    fn default_dashboard_lives_at_dashboard_root() {
        assert_eq!(default_dashboard().pathname, "/dashboard");
    }
}
