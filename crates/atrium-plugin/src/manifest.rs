// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin identity metadata.

use atrium_core::AtriumError;

/// Describes a plugin for diagnostics, status reporting, and config toggles.
///
/// `name` doubles as the contribution source id attached to everything the
/// plugin registers, and as the key in the `[plugins]` config table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginManifest {
    /// Unique name of the plugin (e.g. "blog", "shop").
    pub name: String,
    /// Semantic version string.
    pub version: String,
    /// Human-readable description.
    pub description: String,
}

impl PluginManifest {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
        }
    }

    /// Reject manifests the loader cannot key on.
    pub fn validate(&self) -> Result<(), AtriumError> {
        if self.name.trim().is_empty() {
            return Err(AtriumError::Config(
                "plugin manifest: name must not be empty".to_string(),
            ));
        }
        if self.version.trim().is_empty() {
            return Err(AtriumError::Config(format!(
                "plugin manifest `{}`: version must not be empty",
                self.name
            )));
        }
        Ok(())
    }
}
