use std::sync::Arc;

use uuid::Uuid;

use crate::error::DomainError;
use crate::ports::PostRepository;

/// Hard-delete a post. Existence is confirmed first so the caller can map
/// the failure to a 404 rather than a generic store error.
pub struct DeletePost {
    posts: Arc<dyn PostRepository>,
}

impl DeletePost {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self, id: Uuid) -> Result<(), DomainError> {
        if self.posts.find_by_id(id).await?.is_none() {
            return Err(DomainError::NotFound {
                entity_type: "post",
                id,
            });
        }

        self.posts.delete(id).await?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::testing::{sample_post, StubStore};

    #[tokio::test]
    async fn deleting_missing_post_is_not_found() {
        let store = Arc::new(StubStore::default());
        let err = DeletePost::new(store.clone())
            .execute(Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(store.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn deletes_existing_post() {
        let post = sample_post("hello");
        let store = Arc::new(StubStore::with_post(post.clone()));

        DeletePost::new(store.clone()).execute(post.id).await.unwrap();
        assert_eq!(*store.deleted.lock().unwrap(), vec![post.id]);
    }
}
