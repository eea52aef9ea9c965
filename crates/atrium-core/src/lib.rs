// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Atrium site framework.
//!
//! This crate provides the error type, the contribution shapes plugins
//! register, route tree primitives, and the data types exchanged between
//! registries, aggregators, and the HTTP gateway.

pub mod contribution;
pub mod error;
pub mod route;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use contribution::{
    ContributedRoutes, Resolvable, RobotsContribution, RouteContribution, SitemapContribution,
    SystemEndpointContribution,
};
pub use error::{AtriumError, panic_message};
pub use route::{RouteConfigEntry, RouteHelpers, is_path_within, join_route_paths};
pub use traits::PostStore;
pub use types::{
    ChangeFreq, DashboardContribution, PostPage, PostQuery, PostSummary, RequestContext,
    RobotsFragment, RobotsGroup, Sidebar, SidebarItem, SitemapUrl,
};
