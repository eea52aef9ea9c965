// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Atrium site framework.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use atrium_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Serving {} on port {}", config.site.name, config.server.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::AtriumConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// On a Figment error the TOML sources are re-read so unknown keys can be
/// reported with source spans.
pub fn load_and_validate() -> Result<AtriumConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load configuration from an explicit file path and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<AtriumConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<AtriumConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from("/etc/atrium/atrium.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("atrium/atrium.toml"));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("atrium.toml"));
    }

    candidates
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
