// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests against the gateway router with the built-in plugins.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use atrium_core::{AtriumError, DashboardContribution, PostPage, PostQuery, PostStore, PostSummary};
use atrium_gateway::{ErrorResponse, GatewayState, HealthResponse, SiteSettings, build_router};
use atrium_plugin::builtin::{MemoryPostStore, default_dashboard};
use atrium_plugin::builtin_loader;
use atrium_routes::SiteContext;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use chrono::{TimeZone, Utc};
use futures::future::join_all;
use tower::ServiceExt;
use url::Url;

fn post(slug: &str, day: u32) -> PostSummary {
    PostSummary {
        slug: slug.to_string(),
        title: slug.replace('-', " "),
        updated_at: Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap(),
    }
}

fn state_with(posts: Arc<dyn PostStore>, settings: SiteSettings) -> GatewayState {
    let report = builtin_loader(Arc::clone(&posts)).load(&BTreeMap::new());
    let site = SiteContext::build(report.registries, Some(default_dashboard())).unwrap();
    GatewayState::new(Arc::new(site), posts, settings, Duration::from_secs(60))
}

fn default_state() -> GatewayState {
    let posts = MemoryPostStore::new(vec![post("hello-world", 1), post("second-post", 2)]);
    state_with(Arc::new(posts), SiteSettings::default())
}

async fn get(state: GatewayState, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let request = Request::builder()
        .uri(uri)
        .header(header::HOST, "example.com")
        .body(Body::empty())
        .unwrap();
    let response = build_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn sitemap_is_xml_with_cache_header() {
    let (status, headers, body) = get(default_state(), "/sitemap.xml").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/xml");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=3600");
    assert!(body.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><urlset"#));
    assert!(body.contains("<loc>http://example.com/</loc>"));
    assert!(body.contains("<loc>http://example.com/about</loc>"));
    assert!(body.contains("<loc>http://example.com/blog/second-post</loc>"));
    assert!(!body.contains("/dashboard"));
    assert!(!body.contains(":slug"));
}

#[tokio::test]
async fn sitemap_prefers_configured_origin() {
    let settings = SiteSettings {
        public_origin: Some(Url::parse("https://www.example.org").unwrap()),
        sitemap_max_age_secs: 60,
        ..SiteSettings::default()
    };
    let state = state_with(Arc::new(MemoryPostStore::default()), settings);
    let (_, headers, body) = get(state, "/sitemap.xml").await;

    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=60");
    assert!(body.contains("<loc>https://www.example.org/about</loc>"));
    assert!(!body.contains("example.com"));
}

#[tokio::test]
async fn sitemap_without_host_is_bad_request() {
    let request = Request::builder().uri("/sitemap.xml").body(Body::empty()).unwrap();
    let response = build_router(default_state()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn robots_is_plain_text() {
    let (status, headers, body) = get(default_state(), "/robots.txt").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    assert!(body.starts_with("User-agent: Bingbot\nCrawl-delay: 10\n\nUser-agent: *\n"));
    assert!(body.ends_with("Sitemap: http://example.com/sitemap.xml"));
}

#[tokio::test]
async fn health_reports_site_name() {
    let (status, _, body) = get(default_state(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.site, "atrium");
}

#[tokio::test]
async fn posts_are_paginated_newest_first() {
    let (status, _, body) = get(default_state(), "/api/posts?page=1&per_page=1").await;
    assert_eq!(status, StatusCode::OK);
    let page: PostPage = serde_json::from_str(&body).unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.posts.len(), 1);
    assert_eq!(page.posts[0].slug, "second-post");
}

struct CountingStore {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl PostStore for CountingStore {
    async fn list_published(&self, query: PostQuery) -> Result<PostPage, AtriumError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        if self.fail {
            return Err(AtriumError::Internal("database offline".into()));
        }
        Ok(PostPage {
            posts: vec![],
            page: query.page,
            per_page: query.per_page,
            total: 0,
        })
    }

    async fn all_published(&self) -> Result<Vec<PostSummary>, AtriumError> {
        Ok(vec![])
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_listing_requests_hit_the_store_once() {
    let store = Arc::new(CountingStore {
        calls: AtomicUsize::new(0),
        fail: false,
    });
    let state = state_with(store.clone(), SiteSettings::default());

    let requests = (0..8).map(|_| get(state.clone(), "/api/posts?page=2"));
    let responses = join_all(requests).await;

    assert!(responses.iter().all(|(status, _, _)| *status == StatusCode::OK));
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);

    // A different normalized query is a different key.
    let (status, _, _) = get(state, "/api/posts?page=2&per_page=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failing_listing_returns_500() {
    let store = Arc::new(CountingStore {
        calls: AtomicUsize::new(0),
        fail: true,
    });
    let state = state_with(store, SiteSettings::default());

    let (status, _, body) = get(state, "/api/posts").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let err: ErrorResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(err.error, "failed to load posts");
}

#[tokio::test]
async fn dashboard_lookup_by_pathname() {
    let (status, _, body) = get(default_state(), "/api/dashboard?pathname=/dashboard/blog/new").await;
    assert_eq!(status, StatusCode::OK);
    let dashboard: DashboardContribution = serde_json::from_str(&body).unwrap();
    assert_eq!(dashboard.name, "Blog");

    let (_, _, body) = get(default_state(), "/api/dashboard?pathname=/dashboard/unknown").await;
    let dashboard: DashboardContribution = serde_json::from_str(&body).unwrap();
    assert_eq!(dashboard.name, "Atrium");
}
