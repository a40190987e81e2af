use std::sync::Arc;

use crate::archive::{group_by_year_and_month, ArchiveData};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Build the year/month archive hierarchy from the published posts.
/// Recomputed per call; nothing is cached or persisted.
pub struct GetPostArchive {
    posts: Arc<dyn PostRepository>,
}

impl GetPostArchive {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn execute(&self) -> Result<ArchiveData, DomainError> {
        let posts = self.posts.list_published().await?;
        Ok(group_by_year_and_month(&posts))
    }
}
