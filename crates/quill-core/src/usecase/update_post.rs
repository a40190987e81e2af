use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{is_valid_slug, with_collision_suffix, Post};
use crate::error::DomainError;
use crate::ports::{PostRepository, TaxonomyRepository};

use super::require_non_blank;

/// Partial update: every field except `id` is optional, but a provided
/// field must not be blank.
#[derive(Debug, Clone, Default)]
pub struct UpdatePostInput {
    pub id: Uuid,
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub publish: Option<bool>,
}

pub struct UpdatePost {
    posts: Arc<dyn PostRepository>,
    taxonomy: Arc<dyn TaxonomyRepository>,
}

impl UpdatePost {
    pub fn new(posts: Arc<dyn PostRepository>, taxonomy: Arc<dyn TaxonomyRepository>) -> Self {
        Self { posts, taxonomy }
    }

    pub async fn execute(&self, input: UpdatePostInput) -> Result<Post, DomainError> {
        // Existence is confirmed before any validation side effects write.
        let mut post = self
            .posts
            .find_by_id(input.id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "post",
                id: input.id,
            })?;

        if let Some(title) = &input.title {
            post.title = require_non_blank("title", title)?;
        }
        if let Some(excerpt) = &input.excerpt {
            post.excerpt = require_non_blank("excerpt", excerpt)?;
        }
        if let Some(content) = &input.content {
            let content = require_non_blank("content", content)?;
            post.set_content(content);
        }

        if let Some(slug) = &input.slug {
            let slug = require_non_blank("slug", slug)?;
            if !is_valid_slug(&slug) {
                return Err(DomainError::validation(
                    "slug may only contain letters, digits and single interior hyphens",
                ));
            }
            // Re-saving the current slug is a no-op, not a collision.
            if slug != post.slug && self.posts.slug_exists(&slug, Some(post.id)).await? {
                let fallback = with_collision_suffix(&slug);
                tracing::debug!(requested = %slug, fallback = %fallback, "Slug taken, using suffixed fallback");
                post.slug = fallback;
            } else {
                post.slug = slug;
            }
        }

        if let Some(category) = &input.category {
            post.category = require_non_blank("category", category)?;
        }

        if let Some(tags) = &input.tags {
            let tags: Vec<String> = tags
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            if tags.is_empty() {
                return Err(DomainError::validation("at least one tag is required"));
            }
            post.tags = tags;
        }

        // Every provided field is validated; taxonomy writes start here.
        if input.category.is_some() {
            self.taxonomy.ensure_category(&post.category).await?;
        }
        if input.tags.is_some() {
            self.taxonomy.ensure_tags(&post.tags).await?;
        }

        if let Some(featured) = input.featured {
            post.featured = featured;
        }
        if let Some(publish) = input.publish {
            post.set_published(publish);
        }

        post.updated_at = Utc::now();

        let saved = self.posts.update(post).await?;
        tracing::info!(post_id = %saved.id, "Post updated");
        Ok(saved)
    }
}
