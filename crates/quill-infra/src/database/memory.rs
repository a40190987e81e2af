//! In-memory post store - used as the test fixture and as a fallback when
//! no database is configured. Note: data is lost on process restart.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Pagination, Post, PostFilters, PostPage, PostSort, StatsPolicy};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, TaxonomyRepository};

/// In-memory post repository over an async RwLock'd map.
///
/// Applies the exact reference semantics of the query pipeline: the
/// `PostFilters::matches` predicate, the `PostSort` comparator and
/// offset pagination with totals from the unpaginated filtered count.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
    categories: RwLock<BTreeSet<String>>,
    tags: RwLock<BTreeSet<String>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(
        &self,
        filters: &PostFilters,
        sort: PostSort,
        pagination: Pagination,
    ) -> Result<PostPage, RepoError> {
        let pagination = pagination.normalized();

        let store = self.posts.read().await;
        let mut matched: Vec<Post> = store
            .values()
            .filter(|post| filters.matches(post))
            .cloned()
            .collect();
        drop(store);

        matched.sort_by(|a, b| sort.compare(a, b));

        let total = matched.len() as u64;
        let posts: Vec<Post> = matched
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .collect();

        Ok(PostPage {
            posts,
            total,
            page: pagination.page,
            total_pages: PostPage::total_pages_for(total, pagination.limit),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self
            .posts
            .read()
            .await
            .values()
            .find(|post| post.slug == slug)
            .cloned())
    }

    async fn slug_exists(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, RepoError> {
        Ok(self
            .posts
            .read()
            .await
            .values()
            .any(|post| post.slug == slug && Some(post.id) != exclude_id))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.posts.write().await;
        if store.values().any(|existing| existing.slug == post.slug) {
            return Err(RepoError::Constraint("Post already exists".to_string()));
        }
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.posts.write().await;
        if !store.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        if self.posts.write().await.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn increment_views(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.posts.write().await;
        match store.get_mut(&id) {
            Some(post) => {
                post.views += 1;
                Ok(())
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .posts
            .read()
            .await
            .values()
            .filter(|post| post.is_published)
            .cloned()
            .collect())
    }

    async fn distinct_categories(&self) -> Result<Vec<String>, RepoError> {
        // Union of upserted taxonomy names and what posts actually carry.
        let mut names = self.categories.read().await.clone();
        for post in self.posts.read().await.values() {
            names.insert(post.category.clone());
        }
        Ok(names.into_iter().collect())
    }

    async fn distinct_tags(&self) -> Result<Vec<String>, RepoError> {
        let mut names = self.tags.read().await.clone();
        for post in self.posts.read().await.values() {
            for tag in &post.tags {
                names.insert(tag.clone());
            }
        }
        Ok(names.into_iter().collect())
    }

    async fn published_stats(&self, policy: &StatsPolicy) -> Result<(u64, u64), RepoError> {
        let store = self.posts.read().await;
        let visible = store
            .values()
            .filter(|post| post.is_published && !policy.excludes(post.author_id));

        let mut total_posts = 0u64;
        let mut total_views = 0u64;
        for post in visible {
            total_posts += 1;
            total_views += post.views;
        }

        Ok((total_posts, total_views))
    }
}

#[async_trait]
impl TaxonomyRepository for InMemoryPostRepository {
    async fn ensure_category(&self, name: &str) -> Result<(), RepoError> {
        self.categories.write().await.insert(name.to_string());
        Ok(())
    }

    async fn ensure_tags(&self, names: &[String]) -> Result<(), RepoError> {
        let mut tags = self.tags.write().await;
        for name in names {
            tags.insert(name.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::{SortField, SortOrder};

    fn post(title: &str, views: u64, category: &str, tags: &[&str]) -> Post {
        let mut post = Post::new(
            Uuid::new_v4(),
            title.to_string(),
            format!("{title} content"),
            format!("{title} excerpt"),
            title.to_lowercase().replace(' ', "-"),
            category.to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        );
        post.is_published = true;
        post.views = views;
        post
    }

    async fn seeded() -> InMemoryPostRepository {
        let repo = InMemoryPostRepository::new();
        repo.insert(post("Alpha", 5, "Tech", &["rust"])).await.unwrap();
        repo.insert(post("Beta", 50, "Tech", &["go"])).await.unwrap();
        repo.insert(post("Gamma", 500, "Life", &["rust", "notes"]))
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn find_all_sorts_by_views_and_paginates() {
        let repo = seeded().await;

        let page = repo
            .find_all(
                &PostFilters::default(),
                PostSort {
                    field: SortField::Views,
                    order: SortOrder::Desc,
                },
                Pagination { page: 1, limit: 1 },
            )
            .await
            .unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].views, 500);
    }

    #[tokio::test]
    async fn find_all_filters_conjunctively() {
        let repo = seeded().await;

        let page = repo
            .find_all(
                &PostFilters {
                    category: Some("Tech".to_string()),
                    tags: Some(vec!["rust".to_string()]),
                    ..Default::default()
                },
                PostSort::default(),
                Pagination::default(),
            )
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.posts[0].title, "Alpha");
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_but_totals_hold() {
        let repo = seeded().await;

        let page = repo
            .find_all(
                &PostFilters::default(),
                PostSort::default(),
                Pagination { page: 5, limit: 2 },
            )
            .await
            .unwrap();

        assert!(page.posts.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn slug_exists_honors_exclusion() {
        let repo = seeded().await;
        let alpha = repo.find_by_slug("alpha").await.unwrap().unwrap();

        assert!(repo.slug_exists("alpha", None).await.unwrap());
        assert!(!repo.slug_exists("alpha", Some(alpha.id)).await.unwrap());
        assert!(!repo.slug_exists("missing", None).await.unwrap());
    }

    #[tokio::test]
    async fn increment_views_is_monotonic() {
        let repo = seeded().await;
        let alpha = repo.find_by_slug("alpha").await.unwrap().unwrap();

        for _ in 0..4 {
            repo.increment_views(alpha.id).await.unwrap();
        }

        let reloaded = repo.find_by_id(alpha.id).await.unwrap().unwrap();
        assert_eq!(reloaded.views, alpha.views + 4);
    }

    #[tokio::test]
    async fn distinct_names_union_taxonomy_and_posts() {
        let repo = seeded().await;
        repo.ensure_category("Draft ideas").await.unwrap();
        repo.ensure_tags(&["pending".to_string()]).await.unwrap();

        let categories = repo.distinct_categories().await.unwrap();
        assert_eq!(categories, vec!["Draft ideas", "Life", "Tech"]);

        let tags = repo.distinct_tags().await.unwrap();
        assert_eq!(tags, vec!["go", "notes", "pending", "rust"]);
    }

    #[tokio::test]
    async fn published_stats_respects_exclusion_policy() {
        let repo = seeded().await;
        let hidden = repo.find_by_slug("gamma").await.unwrap().unwrap();

        let everyone = repo.published_stats(&StatsPolicy::default()).await.unwrap();
        assert_eq!(everyone, (3, 555));

        let policy = StatsPolicy::new(vec![hidden.author_id]);
        let public = repo.published_stats(&policy).await.unwrap();
        assert_eq!(public, (2, 55));
    }

    #[tokio::test]
    async fn delete_missing_post_reports_not_found() {
        let repo = InMemoryPostRepository::new();
        let err = repo.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }
}
