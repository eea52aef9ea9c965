// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits at the persistence boundary.

use async_trait::async_trait;

use crate::error::AtriumError;
use crate::types::{PostPage, PostQuery, PostSummary};

/// Read access to published posts.
///
/// The relational schema behind this trait is owned by the host application;
/// listing endpoints and the blog sitemap only see this interface.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Return one page of published posts, newest first.
    async fn list_published(&self, query: PostQuery) -> Result<PostPage, AtriumError>;

    /// Return every published post, newest first.
    async fn all_published(&self) -> Result<Vec<PostSummary>, AtriumError>;
}
