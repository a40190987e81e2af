//! Use-cases - application operations that validate input and orchestrate
//! repository calls. Each one is a small struct over the repository ports
//! with an async `execute`.

mod create_post;
mod delete_post;
mod get_archive;
mod get_post;
mod list_posts;
mod stats;
mod update_post;

#[cfg(test)]
pub(crate) mod testing;

pub use create_post::{CreatePost, CreatePostInput};
pub use delete_post::DeletePost;
pub use get_archive::GetPostArchive;
pub use get_post::{GetPostById, GetPostBySlug};
pub use list_posts::ListPosts;
pub use stats::GetBlogStats;
pub use update_post::{UpdatePost, UpdatePostInput};

use crate::error::DomainError;

/// Trim a required string field, rejecting blank values.
fn require_non_blank(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be blank")));
    }
    Ok(trimmed.to_string())
}
