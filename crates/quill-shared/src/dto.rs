//! Data Transfer Objects - request/response types for the blog API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::domain::{BlogStats, Post, PostPage};
use quill_core::usecase::{CreatePostInput, UpdatePostInput};
use quill_core::DomainError;

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub slug: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author_id: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub publish: bool,
}

/// Request to update a post. Omitted fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub publish: Option<bool>,
}

fn parse_id(field: &str, value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value)
        .map_err(|_| DomainError::Validation(format!("{field} is not a valid UUID")))
}

impl TryFrom<CreatePostRequest> for CreatePostInput {
    type Error = DomainError;

    fn try_from(req: CreatePostRequest) -> Result<Self, Self::Error> {
        Ok(CreatePostInput {
            title: req.title,
            content: req.content,
            excerpt: req.excerpt,
            slug: req.slug,
            category: req.category,
            tags: req.tags,
            author_id: parse_id("author_id", &req.author_id)?,
            featured: req.featured,
            publish: req.publish,
        })
    }
}

impl UpdatePostRequest {
    pub fn into_input(self, id: Uuid) -> UpdatePostInput {
        UpdatePostInput {
            id,
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            slug: self.slug,
            category: self.category,
            tags: self.tags,
            featured: self.featured,
            publish: self.publish,
        }
    }
}

/// A post as serialized for clients. Timestamps are RFC 3339 strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub slug: String,
    pub category: String,
    pub tags: Vec<String>,
    pub published_at: String,
    pub updated_at: String,
    pub views: u64,
    pub featured: bool,
    pub is_published: bool,
    pub read_time: u32,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            title: post.title,
            content: post.content,
            excerpt: post.excerpt,
            slug: post.slug,
            category: post.category,
            tags: post.tags,
            published_at: post.published_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
            views: post.views,
            featured: post.featured,
            is_published: post.is_published,
            read_time: post.read_time,
        }
    }
}

/// One page of posts plus the pagination envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

impl From<PostPage> for PostListResponse {
    fn from(page: PostPage) -> Self {
        Self {
            posts: page.posts.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            total_pages: page.total_pages,
        }
    }
}

/// Public blog statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogStatsResponse {
    pub total_posts: u64,
    pub total_views: u64,
    pub category_count: u64,
    pub tag_count: u64,
}

impl From<BlogStats> for BlogStatsResponse {
    fn from(stats: BlogStats) -> Self {
        Self {
            total_posts: stats.total_posts,
            total_views: stats.total_views,
            category_count: stats.category_count,
            tag_count: stats.tag_count,
        }
    }
}
