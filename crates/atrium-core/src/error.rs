// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Atrium site framework.

use thiserror::Error;

/// The primary error type used across registries, aggregation, and the gateway.
#[derive(Debug, Error)]
pub enum AtriumError {
    /// Configuration errors: invalid settings, missing default dashboard,
    /// duplicate route ids. These indicate a programming error in the host
    /// application and are never recovered from.
    #[error("configuration error: {0}")]
    Config(String),

    /// A plugin contribution failed while being resolved or registered.
    #[error("contribution from `{source_id}` failed: {message}")]
    Contribution { source_id: String, message: String },

    /// A route contribution produced a malformed route tree.
    #[error("invalid route: {0}")]
    Route(String),

    /// Backing data store errors (listing queries, post lookups).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AtriumError {
    /// Shorthand for a contribution failure attributed to `source_id`.
    pub fn contribution(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Contribution {
            source_id: source_id.into(),
            message: message.into(),
        }
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
