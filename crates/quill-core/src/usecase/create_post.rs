use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{is_valid_slug, with_collision_suffix, Post};
use crate::error::DomainError;
use crate::ports::{PostRepository, TaxonomyRepository};

use super::require_non_blank;

/// Input for creating a post. All string fields are required and must be
/// non-blank after trimming; at least one tag is required.
#[derive(Debug, Clone)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub slug: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author_id: Uuid,
    pub featured: bool,
    pub publish: bool,
}

/// Create a new post, upserting its taxonomy and resolving slug
/// collisions with a timestamp suffix instead of rejecting.
pub struct CreatePost {
    posts: Arc<dyn PostRepository>,
    taxonomy: Arc<dyn TaxonomyRepository>,
}

impl CreatePost {
    pub fn new(posts: Arc<dyn PostRepository>, taxonomy: Arc<dyn TaxonomyRepository>) -> Self {
        Self { posts, taxonomy }
    }

    pub async fn execute(&self, input: CreatePostInput) -> Result<Post, DomainError> {
        let title = require_non_blank("title", &input.title)?;
        let content = require_non_blank("content", &input.content)?;
        let excerpt = require_non_blank("excerpt", &input.excerpt)?;
        let slug = require_non_blank("slug", &input.slug)?;
        let category = require_non_blank("category", &input.category)?;

        if input.author_id.is_nil() {
            return Err(DomainError::validation("author_id is required"));
        }

        let tags: Vec<String> = input
            .tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if tags.is_empty() {
            return Err(DomainError::validation("at least one tag is required"));
        }

        if !is_valid_slug(&slug) {
            return Err(DomainError::validation(
                "slug may only contain letters, digits and single interior hyphens",
            ));
        }

        // Find-or-create taxonomy rows ahead of the post write.
        self.taxonomy.ensure_category(&category).await?;
        self.taxonomy.ensure_tags(&tags).await?;

        let slug = if self.posts.slug_exists(&slug, None).await? {
            let fallback = with_collision_suffix(&slug);
            tracing::debug!(requested = %slug, fallback = %fallback, "Slug taken, using suffixed fallback");
            fallback
        } else {
            slug
        };

        let mut post = Post::new(
            input.author_id,
            title,
            content,
            excerpt,
            slug,
            category,
            tags,
        );
        post.featured = input.featured;
        if input.publish {
            post.set_published(true);
        }

        let saved = self.posts.insert(post).await?;
        tracing::info!(post_id = %saved.id, slug = %saved.slug, "Post created");
        Ok(saved)
    }
}
