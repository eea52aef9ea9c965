// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `assets` plugin: the asset library dashboard.

use atrium_core::{
    AtriumError, ContributedRoutes, DashboardContribution, RobotsFragment, RobotsGroup,
    RouteHelpers, Sidebar, SidebarItem, SystemEndpointContribution,
};

use crate::loader::Plugin;
use crate::manifest::PluginManifest;
use crate::registry::Registrar;

#[derive(Debug, Default, Clone, Copy)]
pub struct AssetsPlugin;

impl Plugin for AssetsPlugin {
    fn manifest(&self) -> PluginManifest {
        PluginManifest::new(
            "assets",
            env!("CARGO_PKG_VERSION"),
            "Asset library dashboard",
        )
    }

    fn register(&self, registrar: &mut Registrar) -> Result<(), AtriumError> {
        registrar
            .register_routes(|h: &RouteHelpers| {
                Ok::<_, AtriumError>(ContributedRoutes::dashboard(vec![h.route(
                    "assets",
                    "routes/dashboard/assets/library.tsx",
                    vec![h.route(":assetId", "routes/dashboard/assets/detail.tsx", vec![])],
                )]))
            })
            .register_dashboard(DashboardContribution {
                name: "Assets".to_string(),
                logo: "/assets/assets.svg".to_string(),
                pathname: "/dashboard/assets".to_string(),
                description: Some("Uploaded images and files".to_string()),
                sidebar: Some(Sidebar {
                    primary: vec![SidebarItem::new("Library", "/dashboard/assets").with_icon("image")],
                    secondary: vec![],
                }),
            })
            .register_system_endpoints(SystemEndpointContribution::robots(RobotsFragment {
                groups: vec![
                    RobotsGroup::for_agent("*").disallow("/uploads/private"),
                    RobotsGroup::for_agent("Bingbot").crawl_delay(10.0),
                ],
                sitemaps: vec![],
            }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contributes_only_dashboard_routes() {
        let mut registrar = Registrar::new("assets");
        AssetsPlugin.register(&mut registrar).unwrap();
        let mut registries = crate::registry::Registries::new();
        registries.commit(registrar);

        let routes = registries.routes().get_all()[0]
            .contribution
            .routes(&RouteHelpers)
            .unwrap();
        assert!(routes.public.is_empty());
        assert_eq!(routes.dashboard[0].path.as_deref(), Some("assets"));
    }
}
