// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route composition and dashboard resolution for the Atrium site framework.
//!
//! Consumes the route and dashboard registries once at startup and produces
//! the public and dashboard route trees, the compiled route manifest, and a
//! dashboard resolver, bundled as a [`SiteContext`].

pub mod composer;
pub mod context;
pub mod dashboard;
pub mod manifest;

pub use composer::{ComposedRoutes, DASHBOARD_ROOT, compose_routes, mount_dashboard};
pub use context::SiteContext;
pub use dashboard::{DashboardResolver, matches_for_pathname};
pub use manifest::{ManifestEntry, ROOT_ROUTE_ID, RouteManifest, route_id_for_file};
