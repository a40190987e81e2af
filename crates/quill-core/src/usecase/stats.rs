use std::sync::Arc;

use crate::domain::{BlogStats, StatsPolicy};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Aggregate public statistics. The three underlying queries have no data
/// dependency on one another and run concurrently.
pub struct GetBlogStats {
    posts: Arc<dyn PostRepository>,
    policy: StatsPolicy,
}

impl GetBlogStats {
    pub fn new(posts: Arc<dyn PostRepository>, policy: StatsPolicy) -> Self {
        Self { posts, policy }
    }

    pub async fn execute(&self) -> Result<BlogStats, DomainError> {
        let ((total_posts, total_views), categories, tags) = futures::try_join!(
            self.posts.published_stats(&self.policy),
            self.posts.distinct_categories(),
            self.posts.distinct_tags(),
        )?;

        Ok(BlogStats {
            total_posts,
            total_views,
            category_count: categories.len() as u64,
            tag_count: tags.len() as u64,
        })
    }
}
