// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Atrium site framework.
//!
//! Serves the synthesized `/sitemap.xml` and `/robots.txt`, a cached post
//! listing, dashboard lookup by pathname, and a health probe. All state is
//! built once at startup; handlers only read it.

pub mod handlers;
pub mod origin;
pub mod server;

pub use handlers::{ErrorResponse, HealthResponse};
pub use origin::request_context;
pub use server::{
    GatewayState, HealthState, ServerConfig, SiteSettings, build_router, start_server,
};
