// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route composition.
//!
//! Every route contribution is invoked with [`RouteHelpers`] and its output is
//! concatenated, in registration order, into the public tree and the
//! dashboard tree. A contribution that errors, panics or returns a malformed
//! tree is logged and omitted.

use std::panic::{AssertUnwindSafe, catch_unwind};

use atrium_core::{
    AtriumError, ContributedRoutes, RouteConfigEntry, RouteHelpers, is_path_within,
    join_route_paths, panic_message,
};
use atrium_plugin::{ContributionRegistry, RouteRegistration};
use tracing::{debug, warn};

/// Path under which dashboard routes are mounted.
pub const DASHBOARD_ROOT: &str = "/dashboard";

/// The two route trees produced by composition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposedRoutes {
    pub public: Vec<RouteConfigEntry>,
    /// Dashboard routes, already mounted under [`DASHBOARD_ROOT`].
    pub dashboard: Vec<RouteConfigEntry>,
}

impl ComposedRoutes {
    pub fn is_empty(&self) -> bool {
        self.public.is_empty() && self.dashboard.is_empty()
    }
}

/// Compose every registered route contribution.
pub fn compose_routes(registry: &ContributionRegistry<RouteRegistration>) -> ComposedRoutes {
    let mut composed = ComposedRoutes::default();

    for registered in registry {
        match invoke_contribution(&registered.source, &registered.contribution) {
            Ok(routes) => {
                debug!(
                    source = %registered.source,
                    public = routes.public.len(),
                    dashboard = routes.dashboard.len(),
                    "route contribution composed"
                );
                composed.public.extend(routes.public);
                composed.dashboard.extend(mount_dashboard(routes.dashboard));
            }
            Err(e) => {
                warn!(
                    source = %registered.source,
                    error = %e,
                    "route contribution failed, omitting its routes"
                );
            }
        }
    }
    composed
}

fn invoke_contribution(
    source: &str,
    contribution: &RouteRegistration,
) -> Result<ContributedRoutes, AtriumError> {
    let routes = catch_unwind(AssertUnwindSafe(|| contribution.routes(&RouteHelpers)))
        .map_err(|payload| {
            AtriumError::contribution(
                source,
                format!("panicked while building routes: {}", panic_message(payload.as_ref())),
            )
        })??;
    validate_routes(&routes.public)?;
    validate_routes(&routes.dashboard)?;
    Ok(routes)
}

/// Reject trees the router cannot mount: index routes with children and
/// routes with no module file.
pub fn validate_routes(routes: &[RouteConfigEntry]) -> Result<(), AtriumError> {
    for route in routes {
        if route.file.trim().is_empty() {
            return Err(AtriumError::Route(format!(
                "route `{}` has no module file",
                route.path.as_deref().unwrap_or("<index>")
            )));
        }
        if route.index && !route.children.is_empty() {
            return Err(AtriumError::Route(format!(
                "index route `{}` cannot have children",
                route.file
            )));
        }
        validate_routes(&route.children)?;
    }
    Ok(())
}

/// Mount dashboard routes under [`DASHBOARD_ROOT`].
///
/// Every route that carries a path is mounted on its own: absolute paths
/// within the dashboard root are kept verbatim, other paths (relative or
/// absolute) are joined onto the root. Index routes become the root itself.
/// Pathless layouts are kept and the rule is applied to their children.
pub fn mount_dashboard(routes: Vec<RouteConfigEntry>) -> Vec<RouteConfigEntry> {
    routes.into_iter().map(mount_dashboard_route).collect()
}

fn mount_dashboard_route(mut route: RouteConfigEntry) -> RouteConfigEntry {
    match route.path.clone().filter(|p| !p.is_empty()) {
        Some(path) if path.starts_with('/') && is_path_within(&path, DASHBOARD_ROOT) => {}
        Some(path) => route.path = Some(join_route_paths(DASHBOARD_ROOT, &path)),
        None if route.index => route.path = Some(DASHBOARD_ROOT.to_string()),
        None => route.children = mount_dashboard(std::mem::take(&mut route.children)),
    }
    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn registry(
        contributions: Vec<(&str, RouteRegistration)>,
    ) -> ContributionRegistry<RouteRegistration> {
        let mut reg = ContributionRegistry::new();
        for (source, c) in contributions {
            reg.register(source, c);
        }
        reg
    }

    fn public_only(file: &'static str) -> RouteRegistration {
        Arc::new(move |h: &RouteHelpers| {
            Ok::<_, AtriumError>(ContributedRoutes::public(vec![h.route("p", file, vec![])]))
        })
    }

    #[test]
    fn concatenates_in_registration_order() {
        let reg = registry(vec![("a", public_only("a.tsx")), ("b", public_only("b.tsx"))]);
        let composed = compose_routes(&reg);
        let files: Vec<_> = composed.public.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(files, vec!["a.tsx", "b.tsx"]);
        assert!(composed.dashboard.is_empty());
    }

    #[test]
    #[tracing_test::traced_test]
    fn failing_contribution_is_omitted_and_logged() {
        let failing: RouteRegistration = Arc::new(|_: &RouteHelpers| {
            Err::<ContributedRoutes, _>(AtriumError::Internal("no routes today".into()))
        });
        let reg = registry(vec![
            ("a", public_only("a.tsx")),
            ("broken", failing),
            ("c", public_only("c.tsx")),
        ]);
        let composed = compose_routes(&reg);
        assert_eq!(composed.public.len(), 2);
        assert!(logs_contain("route contribution failed"));
        assert!(logs_contain("broken"));
    }

    #[test]
    fn panicking_contribution_is_omitted() {
        let panicking: RouteRegistration =
            Arc::new(|_: &RouteHelpers| -> Result<ContributedRoutes, AtriumError> {
                panic!("route builder bug")
            });
        let reg = registry(vec![("boom", panicking), ("ok", public_only("ok.tsx"))]);
        let composed = compose_routes(&reg);
        assert_eq!(composed.public.len(), 1);
        assert_eq!(composed.public[0].file, "ok.tsx");
    }

    #[test]
    fn malformed_contribution_is_omitted() {
        let malformed: RouteRegistration = Arc::new(|h: &RouteHelpers| {
            let mut index = h.index("idx.tsx");
            index.children.push(h.index("child.tsx"));
            Ok::<_, AtriumError>(ContributedRoutes::public(vec![index]))
        });
        let reg = registry(vec![("bad", malformed)]);
        assert!(compose_routes(&reg).is_empty());
    }

    #[test]
    fn relative_dashboard_routes_are_mounted() {
        let h = RouteHelpers;
        let mounted = mount_dashboard(vec![
            h.index("home.tsx"),
            h.route("blog", "blog.tsx", vec![h.route("new", "new.tsx", vec![])]),
            h.layout("layout.tsx", vec![h.route("settings", "settings.tsx", vec![])]),
        ]);
        assert_eq!(mounted[0].path.as_deref(), Some("/dashboard"));
        assert_eq!(mounted[1].path.as_deref(), Some("/dashboard/blog"));
        // Children stay relative to their parent.
        assert_eq!(mounted[1].children[0].path.as_deref(), Some("new"));
        assert_eq!(mounted[2].path, None);
        assert_eq!(mounted[2].children[0].path.as_deref(), Some("/dashboard/settings"));
    }

    #[test]
    fn absolute_dashboard_routes_are_verbatim() {
        let h = RouteHelpers;
        let mounted = mount_dashboard(vec![
            h.route("/dashboard/shop", "shop.tsx", vec![]),
            h.route("/dashboard", "root.tsx", vec![]),
            h.route("/dashboards", "other.tsx", vec![]),
            h.route("/reports", "reports.tsx", vec![]),
        ]);
        let paths: Vec<_> = mounted.iter().map(|r| r.path.as_deref().unwrap()).collect();
        assert_eq!(
            paths,
            vec![
                "/dashboard/shop",
                "/dashboard",
                "/dashboard/dashboards",
                "/dashboard/reports"
            ]
        );
    }

    #[test]
    fn absolute_dashboard_routes_inside_layouts_are_verbatim() {
        let h = RouteHelpers;
        let mounted = mount_dashboard(vec![h.layout(
            "shell.tsx",
            vec![
                h.route("/dashboard/shop", "shop.tsx", vec![]),
                h.route("orders", "orders.tsx", vec![]),
                h.layout("inner.tsx", vec![h.route("/dashboard", "home.tsx", vec![])]),
            ],
        )]);
        let shell = &mounted[0];
        assert_eq!(shell.path, None);
        assert_eq!(shell.children[0].path.as_deref(), Some("/dashboard/shop"));
        assert_eq!(shell.children[1].path.as_deref(), Some("/dashboard/orders"));
        assert_eq!(shell.children[2].children[0].path.as_deref(), Some("/dashboard"));
    }

    #[test]
    fn empty_file_is_rejected() {
        let h = RouteHelpers;
        let err = validate_routes(&[h.route("x", "", vec![])]).unwrap_err();
        assert!(err.to_string().contains("no module file"));
    }
}
