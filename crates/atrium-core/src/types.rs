// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared data types exchanged between plugins, aggregators, and the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

use crate::error::AtriumError;

/// The incoming request as seen by contribution resolvers.
///
/// Aggregators only need the request URL to derive the site origin; no query
/// parameters are interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    url: Url,
}

impl RequestContext {
    /// Wrap an already-parsed absolute `http`/`https` URL.
    pub fn new(url: Url) -> Result<Self, AtriumError> {
        match url.scheme() {
            "http" | "https" if url.has_host() => Ok(Self { url }),
            other => Err(AtriumError::Internal(format!(
                "request url `{url}` must be absolute http(s), got scheme `{other}`"
            ))),
        }
    }

    /// Parse a request URL string.
    pub fn parse(raw: &str) -> Result<Self, AtriumError> {
        let url = Url::parse(raw)
            .map_err(|e| AtriumError::Internal(format!("invalid request url `{raw}`: {e}")))?;
        Self::new(url)
    }

    /// The full request URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Scheme, host and port without a trailing slash, e.g. `https://example.com`.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }
}

/// How frequently a page is likely to change, as understood by crawlers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

/// A single sitemap entry.
///
/// `loc` may be relative when produced by a plugin; the sitemap synthesizer
/// normalizes it against the request origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapUrl {
    /// Absolute or origin-relative location.
    pub loc: String,
    /// Last modification time. Defaults to "now" during synthesis.
    #[serde(default)]
    pub lastmod: Option<DateTime<Utc>>,
    /// Expected change frequency.
    #[serde(default)]
    pub changefreq: Option<ChangeFreq>,
    /// Relative priority in `0.0..=1.0`. Zero is treated as absent.
    #[serde(default)]
    pub priority: Option<f32>,
}

impl SitemapUrl {
    /// Create an entry with only a location.
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }

    pub fn with_lastmod(mut self, lastmod: DateTime<Utc>) -> Self {
        self.lastmod = Some(lastmod);
        self
    }

    pub fn with_changefreq(mut self, changefreq: ChangeFreq) -> Self {
        self.changefreq = Some(changefreq);
        self
    }

    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// One rule group of a robots fragment, applying to one or more user agents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsGroup {
    pub user_agents: Vec<String>,
    #[serde(default)]
    pub allow: Vec<String>,
    #[serde(default)]
    pub disallow: Vec<String>,
    #[serde(default)]
    pub crawl_delay: Option<f64>,
}

impl RobotsGroup {
    /// A group for a single user agent with no rules yet.
    pub fn for_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agents: vec![user_agent.into()],
            ..Self::default()
        }
    }

    pub fn allow(mut self, path: impl Into<String>) -> Self {
        self.allow.push(path.into());
        self
    }

    pub fn disallow(mut self, path: impl Into<String>) -> Self {
        self.disallow.push(path.into());
        self
    }

    pub fn crawl_delay(mut self, seconds: f64) -> Self {
        self.crawl_delay = Some(seconds);
        self
    }
}

/// A partial robots.txt contributed by one plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotsFragment {
    #[serde(default)]
    pub groups: Vec<RobotsGroup>,
    #[serde(default)]
    pub sitemaps: Vec<String>,
}

/// A navigation entry in a dashboard sidebar. Items nest arbitrarily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarItem {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SidebarItem>,
}

impl SidebarItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            icon: None,
            items: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_items(mut self, items: Vec<SidebarItem>) -> Self {
        self.items = items;
        self
    }
}

/// Primary and secondary sidebar sections of a dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidebar {
    #[serde(default)]
    pub primary: Vec<SidebarItem>,
    #[serde(default)]
    pub secondary: Vec<SidebarItem>,
}

/// Descriptor of one admin dashboard.
///
/// `pathname` is matched against the current navigation location; it is not
/// required to be unique across plugins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardContribution {
    pub name: String,
    pub logo: String,
    pub pathname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<Sidebar>,
}

/// A published post as exposed to listings and sitemaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

/// Pagination parameters for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostQuery {
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
}

impl PostQuery {
    /// Largest page size a listing will serve.
    pub const MAX_PER_PAGE: u32 = 100;

    /// Clamp to a servable query: pages start at 1, page size is `1..=MAX_PER_PAGE`.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }

    /// Zero-based index of the first post on this page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.per_page as usize)
    }

    /// Stable cache key for this query.
    pub fn cache_key(&self) -> String {
        format!("posts?page={}&per_page={}", self.page, self.per_page)
    }
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

/// One page of a post listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<PostSummary>,
    pub page: u32,
    pub per_page: u32,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn request_origin_strips_path_and_query() {
        let req = RequestContext::parse("https://example.com/sitemap.xml?x=1").unwrap();
        assert_eq!(req.origin(), "https://example.com");
    }

    #[test]
    fn request_origin_keeps_non_default_port() {
        let req = RequestContext::parse("http://localhost:3000/robots.txt").unwrap();
        assert_eq!(req.origin(), "http://localhost:3000");
    }

    #[test]
    fn request_rejects_non_http_scheme() {
        assert!(RequestContext::parse("file:///etc/passwd").is_err());
        assert!(RequestContext::parse("not a url").is_err());
    }

    #[test]
    fn changefreq_display_and_parse() {
        assert_eq!(ChangeFreq::Weekly.to_string(), "weekly");
        assert_eq!(ChangeFreq::from_str("daily").unwrap(), ChangeFreq::Daily);
    }

    #[test]
    fn robots_fragment_deserializes_camel_case() {
        let json = r#"{
            "groups": [{"userAgents": ["*"], "disallow": ["/admin"], "crawlDelay": 5}],
            "sitemaps": ["https://x/a"]
        }"#;
        let fragment: RobotsFragment = serde_json::from_str(json).unwrap();
        assert_eq!(fragment.groups[0].user_agents, vec!["*"]);
        assert_eq!(fragment.groups[0].disallow, vec!["/admin"]);
        assert!(fragment.groups[0].allow.is_empty());
        assert_eq!(fragment.groups[0].crawl_delay, Some(5.0));
        assert_eq!(fragment.sitemaps, vec!["https://x/a"]);
    }

    #[test]
    fn sitemap_url_builder() {
        let url = SitemapUrl::new("/blog")
            .with_changefreq(ChangeFreq::Daily)
            .with_priority(0.8);
        assert_eq!(url.loc, "/blog");
        assert!(url.lastmod.is_none());
        assert_eq!(url.changefreq, Some(ChangeFreq::Daily));
        assert_eq!(url.priority, Some(0.8));
    }

    #[test]
    fn post_query_cache_key_is_stable() {
        let query = PostQuery { page: 2, per_page: 5 };
        assert_eq!(query.cache_key(), "posts?page=2&per_page=5");
        assert_eq!(PostQuery::default().cache_key(), "posts?page=1&per_page=10");
    }

    #[test]
    fn post_query_normalization_clamps() {
        let q = PostQuery { page: 0, per_page: 1000 }.normalized();
        assert_eq!(q, PostQuery { page: 1, per_page: PostQuery::MAX_PER_PAGE });
        let q = PostQuery { page: 3, per_page: 0 }.normalized();
        assert_eq!(q.per_page, 1);
        assert_eq!(PostQuery { page: 3, per_page: 10 }.offset(), 20);
    }
}
