// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `shop` plugin: storefront routes, catalog dashboard, static sitemap
//! entries and checkout exclusions for crawlers.

use atrium_core::{
    AtriumError, ChangeFreq, ContributedRoutes, DashboardContribution, RobotsFragment,
    RobotsGroup, RouteHelpers, Sidebar, SidebarItem, SitemapUrl, SystemEndpointContribution,
};

use crate::loader::Plugin;
use crate::manifest::PluginManifest;
use crate::registry::Registrar;

#[derive(Debug, Default, Clone, Copy)]
pub struct ShopPlugin;

impl Plugin for ShopPlugin {
    fn manifest(&self) -> PluginManifest {
        PluginManifest::new(
            "shop",
            env!("CARGO_PKG_VERSION"),
            "Storefront pages and catalog dashboard",
        )
    }

    fn register(&self, registrar: &mut Registrar) -> Result<(), AtriumError> {
        registrar
            .register_routes(shop_routes)
            .register_dashboard(shop_dashboard())
            .register_sitemap(vec![
                SitemapUrl::new("/shop/collections/new-arrivals")
                    .with_changefreq(ChangeFreq::Daily)
                    .with_priority(0.8),
                SitemapUrl::new("/shop/collections/sale").with_changefreq(ChangeFreq::Daily),
            ])
            .register_system_endpoints(SystemEndpointContribution::robots(RobotsFragment {
                groups: vec![
                    RobotsGroup::for_agent("*")
                        .disallow("/shop/cart")
                        .disallow("/shop/checkout"),
                ],
                sitemaps: vec![],
            }));
        Ok(())
    }
}

fn shop_routes(h: &RouteHelpers) -> Result<ContributedRoutes, AtriumError> {
    let public = vec![h.route(
        "shop",
        "routes/shop/layout.tsx",
        vec![
            h.index("routes/shop/index.tsx"),
            h.route("products/:handle", "routes/shop/product.tsx", vec![]),
            h.route("cart", "routes/shop/cart.tsx", vec![]),
            h.route("checkout", "routes/shop/checkout.tsx", vec![]),
        ],
    )];
    // Already under the dashboard root, so mounted verbatim.
    let dashboard = vec![h.route(
        "/dashboard/shop",
        "routes/dashboard/shop/layout.tsx",
        vec![
            h.index("routes/dashboard/shop/products.tsx"),
            h.route("orders", "routes/dashboard/shop/orders.tsx", vec![]),
        ],
    )];
    Ok(ContributedRoutes::public(public).with_dashboard(dashboard))
}

fn shop_dashboard() -> DashboardContribution {
    DashboardContribution {
        name: "Shop".to_string(),
        logo: "/assets/shop.svg".to_string(),
        pathname: "/dashboard/shop".to_string(),
        description: None,
        sidebar: Some(Sidebar {
            primary: vec![
                SidebarItem::new("Products", "/dashboard/shop").with_icon("package"),
                SidebarItem::new("Orders", "/dashboard/shop/orders").with_icon("receipt"),
            ],
            secondary: vec![],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_routes_use_absolute_mount() {
        let routes = shop_routes(&RouteHelpers).unwrap();
        assert_eq!(routes.dashboard[0].path.as_deref(), Some("/dashboard/shop"));
        assert_eq!(routes.public[0].children.len(), 4);
    }

    #[test]
    fn registers_every_contribution_kind() {
        let mut registrar = Registrar::new("shop");
        ShopPlugin.register(&mut registrar).unwrap();
        let summary = crate::registry::Registries::new().commit(registrar);
        assert_eq!(summary.routes, 1);
        assert_eq!(summary.dashboards, 1);
        assert_eq!(summary.sitemaps, 1);
        assert_eq!(summary.system_endpoints, 1);
    }
}
