// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin system for the Atrium site framework.
//!
//! Plugins register route, dashboard, sitemap, and system endpoint
//! contributions into append-only registries at startup. The registries are
//! frozen once loading completes and shared read-only by the aggregators.

pub mod builtin;
pub mod catalog;
pub mod loader;
pub mod manifest;
pub mod registry;

pub use catalog::{builtin_catalog, builtin_loader, builtin_plugins};
pub use loader::{LoadReport, Plugin, PluginLoader, PluginRecord, PluginStatus};
pub use manifest::PluginManifest;
pub use registry::{
    ContributionRegistry, Registered, RegistrationSummary, Registrar, Registries,
    RouteRegistration,
};
