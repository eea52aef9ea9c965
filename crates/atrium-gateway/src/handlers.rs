// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles GET /sitemap.xml, GET /robots.txt, GET /health, GET /api/posts,
//! GET /api/dashboard.

use std::sync::Arc;

use atrium_core::{AtriumError, PostQuery, RequestContext};
use atrium_seo::{render_sitemap_xml, synthesize_robots, synthesize_sitemap};
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::origin::request_context;
use crate::server::GatewayState;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub site: String,
    pub uptime_secs: u64,
}

/// Query parameters for GET /api/posts.
#[derive(Debug, Deserialize)]
pub struct PostsParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl PostsParams {
    fn into_query(self) -> PostQuery {
        let defaults = PostQuery::default();
        PostQuery {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
        .normalized()
    }
}

/// Query parameters for GET /api/dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub pathname: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn resolve_request(
    state: &GatewayState,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<RequestContext, Response> {
    request_context(headers, uri, state.settings.public_origin.as_ref()).map_err(|e| {
        warn!(error = %e, "cannot derive request origin");
        error_response(StatusCode::BAD_REQUEST, e.to_string())
    })
}

/// GET /sitemap.xml
pub async fn get_sitemap(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let request = match resolve_request(&state, &headers, &uri) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let urls = synthesize_sitemap(
        state.site.manifest(),
        state.site.registries(),
        &request,
        chrono::Utc::now(),
    )
    .await;
    let cache_control = format!("public, max-age={}", state.settings.sitemap_max_age_secs);

    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/xml")),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_str(&cache_control)
                    .unwrap_or_else(|_| HeaderValue::from_static("public")),
            ),
        ],
        render_sitemap_xml(&urls),
    )
        .into_response()
}

/// GET /robots.txt
pub async fn get_robots(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let request = match resolve_request(&state, &headers, &uri) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let body = synthesize_robots(state.site.registries(), &request).await;
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )],
        body,
    )
        .into_response()
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        site: state.settings.name.clone(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

/// GET /api/posts?page=&per_page=
///
/// Served through the listing cache keyed by the normalized query.
pub async fn get_posts(
    State(state): State<GatewayState>,
    Query(params): Query<PostsParams>,
) -> Response {
    let query = params.into_query();
    let posts = Arc::clone(&state.posts);

    let result = state
        .listings
        .get(&query.cache_key(), move || async move {
            posts.list_published(query).await
        })
        .await;

    match result {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => {
            error!(error = %e, page = query.page, per_page = query.per_page, "post listing failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to load posts")
        }
    }
}

/// GET /api/dashboard?pathname=
pub async fn get_dashboard(
    State(state): State<GatewayState>,
    Query(params): Query<DashboardParams>,
) -> Response {
    match state.site.dashboards().resolve_pathname(&params.pathname) {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard.clone())).into_response(),
        Err(e @ AtriumError::Config(_)) => {
            error!(error = %e, pathname = %params.pathname, "dashboard resolution failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posts_params_default_and_clamp() {
        let q = PostsParams {
            page: None,
            per_page: None,
        }
        .into_query();
        assert_eq!(q, PostQuery::default());

        let q = PostsParams {
            page: Some(0),
            per_page: Some(10_000),
        }
        .into_query();
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, PostQuery::MAX_PER_PAGE);
    }

    #[test]
    fn error_response_has_status() {
        let resp = error_response(StatusCode::BAD_REQUEST, "nope");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
