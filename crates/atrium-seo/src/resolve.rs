// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fail-soft resolution of a single contribution.

use std::panic::AssertUnwindSafe;

use atrium_core::{RequestContext, Resolvable, panic_message};
use futures::FutureExt;
use tracing::warn;

/// Resolve `contribution` for `request`, isolating errors and panics.
///
/// A failing contribution is logged with its source plugin and yields
/// `None`; the caller treats it as contributing nothing.
pub async fn resolve_guarded<T: Clone>(
    source: &str,
    endpoint: &'static str,
    contribution: &Resolvable<T>,
    request: &RequestContext,
) -> Option<T> {
    match AssertUnwindSafe(contribution.resolve(request))
        .catch_unwind()
        .await
    {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            warn!(
                source = %source,
                endpoint,
                kind = contribution.kind(),
                error = %e,
                "contribution failed, treating as empty"
            );
            None
        }
        Err(payload) => {
            warn!(
                source = %source,
                endpoint,
                kind = contribution.kind(),
                panic = %panic_message(payload.as_ref()),
                "contribution panicked, treating as empty"
            );
            None
        }
    }
}
