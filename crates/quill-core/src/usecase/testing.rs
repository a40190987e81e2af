//! Recording test doubles for use-case unit tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Pagination, Post, PostFilters, PostPage, PostSort, StatsPolicy};
use crate::error::RepoError;
use crate::ports::{PostRepository, TaxonomyRepository};

/// A post stub: "Hello" post with the given slug, already published.
pub(crate) fn sample_post(slug: &str) -> Post {
    let mut post = Post::new(
        Uuid::new_v4(),
        "Hello".to_string(),
        "Hello world content".to_string(),
        "Hello excerpt".to_string(),
        slug.to_string(),
        "Tech".to_string(),
        vec!["rust".to_string()],
    );
    post.is_published = true;
    post
}

/// Single-post repository double that records every write it receives.
#[derive(Default)]
pub(crate) struct StubStore {
    pub post: Mutex<Option<Post>>,
    pub slug_taken: bool,
    pub stats: (u64, u64),
    pub categories: Mutex<Vec<String>>,
    pub tags: Mutex<Vec<String>>,

    pub inserted: Mutex<Option<Post>>,
    pub updated: Mutex<Option<Post>>,
    pub deleted: Mutex<Vec<Uuid>>,
    pub increments: AtomicU64,
    pub ensured_categories: Mutex<Vec<String>>,
    pub ensured_tags: Mutex<Vec<String>>,
    pub last_query: Mutex<Option<(PostFilters, PostSort, Pagination)>>,
}

impl StubStore {
    pub fn with_post(post: Post) -> Self {
        Self {
            post: Mutex::new(Some(post)),
            ..Default::default()
        }
    }
}

#[async_trait]
impl PostRepository for StubStore {
    async fn find_all(
        &self,
        filters: &PostFilters,
        sort: PostSort,
        pagination: Pagination,
    ) -> Result<PostPage, RepoError> {
        *self.last_query.lock().unwrap() = Some((filters.clone(), sort, pagination));
        Ok(PostPage {
            posts: Vec::new(),
            total: 0,
            page: pagination.page,
            total_pages: 0,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self
            .post
            .lock()
            .unwrap()
            .clone()
            .filter(|post| post.id == id))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self
            .post
            .lock()
            .unwrap()
            .clone()
            .filter(|post| post.slug == slug))
    }

    async fn slug_exists(&self, _slug: &str, _exclude_id: Option<Uuid>) -> Result<bool, RepoError> {
        Ok(self.slug_taken)
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        *self.inserted.lock().unwrap() = Some(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        *self.updated.lock().unwrap() = Some(post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }

    async fn increment_views(&self, _id: Uuid) -> Result<(), RepoError> {
        self.increments.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .post
            .lock()
            .unwrap()
            .clone()
            .filter(|post| post.is_published)
            .into_iter()
            .collect())
    }

    async fn distinct_categories(&self) -> Result<Vec<String>, RepoError> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn distinct_tags(&self) -> Result<Vec<String>, RepoError> {
        Ok(self.tags.lock().unwrap().clone())
    }

    async fn published_stats(&self, _policy: &StatsPolicy) -> Result<(u64, u64), RepoError> {
        Ok(self.stats)
    }
}

#[async_trait]
impl TaxonomyRepository for StubStore {
    async fn ensure_category(&self, name: &str) -> Result<(), RepoError> {
        self.ensured_categories.lock().unwrap().push(name.to_string());
        Ok(())
    }

    async fn ensure_tags(&self, names: &[String]) -> Result<(), RepoError> {
        self.ensured_tags.lock().unwrap().extend_from_slice(names);
        Ok(())
    }
}
