// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard resolution for a navigation location.

use atrium_core::{AtriumError, DashboardContribution};
use atrium_plugin::ContributionRegistry;

/// Picks the dashboard descriptor for the current location.
///
/// Registered dashboards are scanned in registration order, so when several
/// share a `pathname` the first registered wins.
#[derive(Debug, Clone)]
pub struct DashboardResolver {
    dashboards: Vec<DashboardContribution>,
    default: Option<DashboardContribution>,
}

impl DashboardResolver {
    pub fn new(
        registry: &ContributionRegistry<DashboardContribution>,
        default: Option<DashboardContribution>,
    ) -> Self {
        Self {
            dashboards: registry.iter().map(|r| r.contribution.clone()).collect(),
            default,
        }
    }

    /// All registered dashboards, in registration order.
    pub fn dashboards(&self) -> &[DashboardContribution] {
        &self.dashboards
    }

    pub fn default_dashboard(&self) -> Option<&DashboardContribution> {
        self.default.as_ref()
    }

    /// Resolve against a stack of matched route paths, most specific last.
    ///
    /// Segments are scanned from most to least specific; the first dashboard
    /// whose `pathname` equals a segment path wins. Falls back to the default.
    /// With no match and no default this is a configuration error.
    pub fn resolve<S: AsRef<str>>(
        &self,
        matched: &[S],
    ) -> Result<&DashboardContribution, AtriumError> {
        for segment in matched.iter().rev() {
            let segment = normalize_path(segment.as_ref());
            if let Some(found) = self
                .dashboards
                .iter()
                .find(|d| normalize_path(&d.pathname) == segment)
            {
                return Ok(found);
            }
        }
        self.default.as_ref().ok_or_else(|| {
            AtriumError::Config(
                "no dashboard matches the current location and no default dashboard is configured"
                    .to_string(),
            )
        })
    }

    /// Resolve for a raw pathname such as `/dashboard/blog/posts`.
    pub fn resolve_pathname(&self, pathname: &str) -> Result<&DashboardContribution, AtriumError> {
        self.resolve(&matches_for_pathname(pathname))
    }
}

/// The matched-segment stack for a pathname, least specific first.
///
/// `/dashboard/blog/posts` yields `/dashboard`, `/dashboard/blog`,
/// `/dashboard/blog/posts`. The root pathname yields `/`.
pub fn matches_for_pathname(pathname: &str) -> Vec<String> {
    let pathname = pathname
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let mut stack = Vec::new();
    let mut current = String::new();
    for segment in pathname.split('/').filter(|s| !s.is_empty()) {
        current.push('/');
        current.push_str(segment);
        stack.push(current.clone());
    }
    if stack.is_empty() {
        stack.push("/".to_string());
    }
    stack
}

fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
