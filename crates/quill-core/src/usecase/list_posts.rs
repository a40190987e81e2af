use std::sync::Arc;

use crate::domain::{Pagination, PostFilters, PostPage, PostSort};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Filtered, sorted, paginated listing. Omitted parameters fall back to
/// no filters, newest-first by publication date, page 1 with 10 items.
pub struct ListPosts {
    posts: Arc<dyn PostRepository>,
}

impl ListPosts {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn execute(
        &self,
        filters: Option<PostFilters>,
        sort: Option<PostSort>,
        pagination: Option<Pagination>,
    ) -> Result<PostPage, DomainError> {
        let page = self
            .posts
            .find_all(
                &filters.unwrap_or_default(),
                sort.unwrap_or_default(),
                pagination.unwrap_or_default().normalized(),
            )
            .await?;
        Ok(page)
    }
}
