// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request origin derivation.
//!
//! A configured public origin wins. Otherwise the origin comes from
//! `X-Forwarded-Proto` (default `http`) and `X-Forwarded-Host` or `Host`.

use atrium_core::{AtriumError, RequestContext};
use axum::http::{HeaderMap, Uri, header};
use url::Url;

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";

/// Build the request context for an incoming request.
pub fn request_context(
    headers: &HeaderMap,
    uri: &Uri,
    public_origin: Option<&Url>,
) -> Result<RequestContext, AtriumError> {
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    if let Some(origin) = public_origin {
        let url = origin
            .join(path)
            .map_err(|e| AtriumError::Config(format!("invalid public origin `{origin}`: {e}")))?;
        return RequestContext::new(url);
    }

    let proto = first_value(headers, FORWARDED_PROTO).unwrap_or("http");
    let host = first_value(headers, FORWARDED_HOST)
        .or_else(|| first_value(headers, header::HOST.as_str()))
        .ok_or_else(|| AtriumError::Route("request has no Host header".to_string()))?;

    RequestContext::parse(&format!("{proto}://{host}{path}"))
}

/// First comma-separated value of a header, trimmed.
fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
