// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind hosts, absolute origins, and unique post slugs.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::AtriumConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AtriumConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if let Some(origin) = &config.site.public_origin {
        if let Err(message) = check_origin(origin) {
            errors.push(ConfigError::Validation { message });
        }
    }

    if config.cache.listing_ttl_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "cache.listing_ttl_ms must be greater than 0".to_string(),
        });
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of: {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let mut seen_slugs = HashSet::new();
    for (i, post) in config.blog.posts.iter().enumerate() {
        if post.slug.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("blog.posts[{i}].slug must not be empty"),
            });
        } else if !seen_slugs.insert(post.slug.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate post slug `{}` in [[blog.posts]]", post.slug),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A public origin must be an absolute http(s) URL with no path, query or fragment.
fn check_origin(origin: &str) -> Result<(), String> {
    let url = url::Url::parse(origin)
        .map_err(|e| format!("site.public_origin `{origin}` is not a valid URL: {e}"))?;
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(format!(
            "site.public_origin `{origin}` must be an absolute http(s) URL"
        ));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(format!(
            "site.public_origin `{origin}` must not contain a path, query or fragment"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PostSeed;

    fn seed(slug: &str) -> PostSeed {
        PostSeed {
            slug: slug.to_string(),
            title: format!("Post {slug}"),
            published: true,
            updated_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn default_config_validates() {
        let config = AtriumConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_host_fails_validation() {
        let mut config = AtriumConfig::default();
        config.server.host = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("server.host"))));
    }

    #[test]
    fn public_origin_with_path_fails_validation() {
        let mut config = AtriumConfig::default();
        config.site.public_origin = Some("https://example.com/blog".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("public_origin"))));
    }

    #[test]
    fn public_origin_must_be_http() {
        let mut config = AtriumConfig::default();
        config.site.public_origin = Some("ftp://example.com".to_string());
        assert!(validate_config(&config).is_err());

        config.site.public_origin = Some("https://example.com".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_ttl_fails_validation() {
        let mut config = AtriumConfig::default();
        config.cache.listing_ttl_ms = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("listing_ttl_ms"))));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = AtriumConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(validate_config(&config).is_err());

        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn duplicate_post_slugs_fail_validation() {
        let mut config = AtriumConfig::default();
        config.blog.posts = vec![seed("hello"), seed("world"), seed("hello")];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("duplicate post slug `hello`"))
        ));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = AtriumConfig::default();
        config.server.host = String::new();
        config.cache.listing_ttl_ms = 0;
        config.logging.level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
