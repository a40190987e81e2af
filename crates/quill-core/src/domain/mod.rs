//! Domain entities and query types - the core business objects.

mod post;
mod query;
mod slug;
mod stats;

pub use post::Post;
pub use query::{Pagination, PostFilters, PostPage, PostSort, SortField, SortOrder};
pub use slug::{is_valid_slug, with_collision_suffix};
pub use stats::{BlogStats, StatsPolicy};
