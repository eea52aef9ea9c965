// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `blog` plugin and an in-memory post store.
//!
//! Sitemap entries for posts are produced asynchronously from the
//! [`PostStore`] on every sitemap request.

use std::sync::Arc;

use async_trait::async_trait;
use atrium_core::{
    AtriumError, ChangeFreq, ContributedRoutes, DashboardContribution, PostPage, PostQuery,
    PostStore, PostSummary, RouteHelpers, Sidebar, SidebarItem, SitemapContribution, SitemapUrl,
};

use crate::loader::Plugin;
use crate::manifest::PluginManifest;
use crate::registry::Registrar;

/// Blog routes, the blog dashboard, and per-post sitemap entries.
pub struct BlogPlugin {
    posts: Arc<dyn PostStore>,
}

impl BlogPlugin {
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }
}

impl Plugin for BlogPlugin {
    fn manifest(&self) -> PluginManifest {
        PluginManifest::new(
            "blog",
            env!("CARGO_PKG_VERSION"),
            "Blog pages, post management dashboard, post sitemap entries",
        )
    }

    fn register(&self, registrar: &mut Registrar) -> Result<(), AtriumError> {
        let posts = Arc::clone(&self.posts);
        registrar
            .register_routes(blog_routes)
            .register_dashboard(blog_dashboard())
            .register_sitemap(SitemapContribution::from_async(move |_request| {
                let posts = Arc::clone(&posts);
                async move { post_sitemap_entries(posts.as_ref()).await }
            }));
        Ok(())
    }
}

fn blog_routes(h: &RouteHelpers) -> Result<ContributedRoutes, AtriumError> {
    let public = h.prefix(
        "blog",
        vec![
            h.index("routes/blog/index.tsx"),
            h.route(":slug", "routes/blog/post.tsx", vec![]),
        ],
    );
    let dashboard = vec![h.route(
        "blog",
        "routes/dashboard/blog/layout.tsx",
        vec![
            h.index("routes/dashboard/blog/posts.tsx"),
            h.route("new", "routes/dashboard/blog/new.tsx", vec![]),
            h.route(":postId/edit", "routes/dashboard/blog/edit.tsx", vec![]),
        ],
    )];
    Ok(ContributedRoutes::public(public).with_dashboard(dashboard))
}

fn blog_dashboard() -> DashboardContribution {
    DashboardContribution {
        name: "Blog".to_string(),
        logo: "/assets/blog.svg".to_string(),
        pathname: "/dashboard/blog".to_string(),
        description: Some("Write and publish posts".to_string()),
        sidebar: Some(Sidebar {
            primary: vec![
                SidebarItem::new("Posts", "/dashboard/blog").with_icon("file-text"),
                SidebarItem::new("New post", "/dashboard/blog/new").with_icon("plus"),
            ],
            secondary: vec![SidebarItem::new("Back to site admin", "/dashboard")],
        }),
    }
}

async fn post_sitemap_entries(posts: &dyn PostStore) -> Result<Vec<SitemapUrl>, AtriumError> {
    let published = posts.all_published().await?;
    Ok(published
        .into_iter()
        .map(|post| {
            SitemapUrl::new(format!("/blog/{}", post.slug))
                .with_lastmod(post.updated_at)
                .with_changefreq(ChangeFreq::Weekly)
                .with_priority(0.7)
        })
        .collect())
}

/// Published posts held in memory, newest first.
#[derive(Debug, Clone, Default)]
pub struct MemoryPostStore {
    posts: Vec<PostSummary>,
}

impl MemoryPostStore {
    pub fn new(mut posts: Vec<PostSummary>) -> Self {
        posts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Self { posts }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list_published(&self, query: PostQuery) -> Result<PostPage, AtriumError> {
        let query = query.normalized();
        let posts = self
            .posts
            .iter()
            .skip(query.offset())
            .take(query.per_page as usize)
            .cloned()
            .collect();
        Ok(PostPage {
            posts,
            page: query.page,
            per_page: query.per_page,
            total: self.posts.len(),
        })
    }

    async fn all_published(&self) -> Result<Vec<PostSummary>, AtriumError> {
        Ok(self.posts.clone())
    }
}
