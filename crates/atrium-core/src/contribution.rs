// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contribution shapes that plugins register.
//!
//! Route contributions are functions over [`RouteHelpers`]. Sitemap and
//! robots contributions are [`Resolvable`] values: a literal, a synchronous
//! function of the request, or an asynchronous one.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::error::AtriumError;
use crate::route::{RouteConfigEntry, RouteHelpers};
use crate::types::{RequestContext, RobotsFragment, SitemapUrl};

/// Route subtrees returned by one route contribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributedRoutes {
    /// Routes mounted in the public site tree.
    pub public: Vec<RouteConfigEntry>,
    /// Routes mounted in the dashboard tree.
    pub dashboard: Vec<RouteConfigEntry>,
}

impl ContributedRoutes {
    pub fn public(routes: Vec<RouteConfigEntry>) -> Self {
        Self {
            public: routes,
            dashboard: Vec::new(),
        }
    }

    pub fn dashboard(routes: Vec<RouteConfigEntry>) -> Self {
        Self {
            public: Vec::new(),
            dashboard: routes,
        }
    }

    pub fn with_dashboard(mut self, routes: Vec<RouteConfigEntry>) -> Self {
        self.dashboard = routes;
        self
    }
}

/// Builds route subtrees from the route-building primitives.
pub trait RouteContribution: Send + Sync {
    fn routes(&self, helpers: &RouteHelpers) -> Result<ContributedRoutes, AtriumError>;
}

impl<F> RouteContribution for F
where
    F: Fn(&RouteHelpers) -> Result<ContributedRoutes, AtriumError> + Send + Sync,
{
    fn routes(&self, helpers: &RouteHelpers) -> Result<ContributedRoutes, AtriumError> {
        self(helpers)
    }
}

type SyncResolver<T> = dyn Fn(&RequestContext) -> Result<T, AtriumError> + Send + Sync;
type AsyncResolver<T> =
    dyn Fn(RequestContext) -> BoxFuture<'static, Result<T, AtriumError>> + Send + Sync;

/// A value that is either given literally or computed from the request.
pub enum Resolvable<T> {
    Static(T),
    Sync(Arc<SyncResolver<T>>),
    Async(Arc<AsyncResolver<T>>),
}

impl<T> Resolvable<T> {
    /// Wrap a synchronous resolver.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&RequestContext) -> Result<T, AtriumError> + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(f))
    }

    /// Wrap an asynchronous resolver.
    pub fn from_async<F, Fut>(f: F) -> Self
    where
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, AtriumError>> + Send + 'static,
    {
        Self::Async(Arc::new(move |req| f(req).boxed()))
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Static(_) => "static",
            Self::Sync(_) => "sync",
            Self::Async(_) => "async",
        }
    }
}

impl<T: Clone> Resolvable<T> {
    /// Produce the value for `request`, calling and awaiting as needed.
    pub async fn resolve(&self, request: &RequestContext) -> Result<T, AtriumError> {
        match self {
            Self::Static(value) => Ok(value.clone()),
            Self::Sync(f) => f(request),
            Self::Async(f) => f(request.clone()).await,
        }
    }
}

impl<T: Clone> Clone for Resolvable<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(value) => Self::Static(value.clone()),
            Self::Sync(f) => Self::Sync(Arc::clone(f)),
            Self::Async(f) => Self::Async(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Resolvable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Sync(_) => f.write_str("Sync(<fn>)"),
            Self::Async(_) => f.write_str("Async(<fn>)"),
        }
    }
}

impl<T> From<T> for Resolvable<T> {
    fn from(value: T) -> Self {
        Self::Static(value)
    }
}

/// Sitemap entries contributed by a plugin.
pub type SitemapContribution = Resolvable<Vec<SitemapUrl>>;

/// A robots.txt fragment contributed by a plugin.
pub type RobotsContribution = Resolvable<RobotsFragment>;

/// System endpoint logic contributed by a plugin.
#[derive(Debug, Clone, Default)]
pub struct SystemEndpointContribution {
    pub sitemap: Option<SitemapContribution>,
    pub robots: Option<RobotsContribution>,
}

impl SystemEndpointContribution {
    pub fn robots(robots: impl Into<RobotsContribution>) -> Self {
        Self {
            sitemap: None,
            robots: Some(robots.into()),
        }
    }

    pub fn sitemap(sitemap: impl Into<SitemapContribution>) -> Self {
        Self {
            sitemap: Some(sitemap.into()),
            robots: None,
        }
    }
}
