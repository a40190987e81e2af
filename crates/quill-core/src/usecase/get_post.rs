use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Look up a post by ID. A successful lookup bumps the view counter
/// exactly once; a miss returns `None` and touches nothing. These two
/// lookups are the only code path that increments views.
pub struct GetPostById {
    posts: Arc<dyn PostRepository>,
}

impl GetPostById {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        match self.posts.find_by_id(id).await? {
            Some(post) => {
                record_view(self.posts.as_ref(), &post).await;
                Ok(Some(post))
            }
            None => Ok(None),
        }
    }
}

/// Slug variant of the view-counting lookup.
pub struct GetPostBySlug {
    posts: Arc<dyn PostRepository>,
}

impl GetPostBySlug {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        match self.posts.find_by_slug(slug).await? {
            Some(post) => {
                record_view(self.posts.as_ref(), &post).await;
                Ok(Some(post))
            }
            None => Ok(None),
        }
    }
}

/// Fire-and-forget increment: a failed bump is logged, never surfaced.
async fn record_view(posts: &dyn PostRepository, post: &Post) {
    if let Err(err) = posts.increment_views(post.id).await {
        tracing::warn!(post_id = %post.id, error = %err, "Failed to increment view counter");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use crate::usecase::testing::{sample_post, StubStore};

    #[tokio::test]
    async fn hit_increments_views_exactly_once_per_lookup() {
        let post = sample_post("hello");
        let store = Arc::new(StubStore::with_post(post.clone()));

        let by_id = GetPostById::new(store.clone());
        for _ in 0..3 {
            assert!(by_id.execute(post.id).await.unwrap().is_some());
        }
        assert_eq!(store.increments.load(Ordering::SeqCst), 3);

        let by_slug = GetPostBySlug::new(store.clone());
        assert!(by_slug.execute("hello").await.unwrap().is_some());
        assert_eq!(store.increments.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn miss_returns_none_without_counting() {
        let store = Arc::new(StubStore::default());

        let by_id = GetPostById::new(store.clone());
        assert!(by_id.execute(Uuid::new_v4()).await.unwrap().is_none());

        let by_slug = GetPostBySlug::new(store.clone());
        assert!(by_slug.execute("missing").await.unwrap().is_none());

        assert_eq!(store.increments.load(Ordering::SeqCst), 0);
    }
}
