use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Pagination, Post, PostFilters, PostPage, PostSort, StatsPolicy};
use crate::error::RepoError;

/// Post repository - the storage port for the query pipeline.
///
/// Read lookups report absence as `Ok(None)`; only write paths surface
/// `RepoError::NotFound`.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Filtered, sorted, offset-paginated listing. Implementations apply
    /// the filter conjunctively, normalize the pagination bounds, and
    /// compute `total`/`total_pages` from the unpaginated filtered count.
    async fn find_all(
        &self,
        filters: &PostFilters,
        sort: PostSort,
        pagination: Pagination,
    ) -> Result<PostPage, RepoError>;

    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Find a post by its unique slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Check slug uniqueness. `exclude_id` lets an update skip the post
    /// being edited, so re-saving the current slug is not a collision.
    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, RepoError>;

    /// Persist a new post.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Persist changes to an existing post.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Hard delete. Fails with `RepoError::NotFound` when no row matched.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;

    /// Atomically bump the view counter. Fire-and-forget: no payload.
    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError>;

    /// All published posts, for archive aggregation.
    async fn list_published(&self) -> Result<Vec<Post>, RepoError>;

    /// Distinct category names, sorted.
    async fn distinct_categories(&self) -> Result<Vec<String>, RepoError>;

    /// Distinct tag names, sorted.
    async fn distinct_tags(&self) -> Result<Vec<String>, RepoError>;

    /// `(post count, view sum)` over published posts, minus the authors
    /// excluded by the policy.
    async fn published_stats(&self, policy: &StatsPolicy) -> Result<(u64, u64), RepoError>;
}

/// Find-or-create upsert for denormalized category and tag names.
///
/// Writes never reject an unknown name; missing taxonomy rows are created
/// as a side effect, ahead of the post write itself.
#[async_trait]
pub trait TaxonomyRepository: Send + Sync {
    async fn ensure_category(&self, name: &str) -> Result<(), RepoError>;

    async fn ensure_tags(&self, names: &[String]) -> Result<(), RepoError>;
}
