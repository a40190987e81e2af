//! Query parameter types for the post listing pipeline.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::post::Post;

/// Filter criteria for post listings. All provided criteria are combined
/// with AND semantics; the free-text search is an OR across fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFilters {
    pub category: Option<String>,
    /// Any-of match: a post qualifies if it carries at least one of these.
    pub tags: Option<Vec<String>>,
    pub author_id: Option<Uuid>,
    /// Case-insensitive substring over title, excerpt, content and tags.
    pub search: Option<String>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
}

impl PostFilters {
    /// The reference filter predicate. The in-memory store applies it
    /// directly; the SQL adapter expresses the same conditions in SQL.
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(category) = &self.category {
            if post.category != *category {
                return false;
            }
        }
        if let Some(tags) = &self.tags {
            if !tags.is_empty() && !tags.iter().any(|t| post.tags.contains(t)) {
                return false;
            }
        }
        if let Some(author_id) = self.author_id {
            if post.author_id != author_id {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if post.featured != featured {
                return false;
            }
        }
        if let Some(published) = self.published {
            if post.is_published != published {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let query = search.trim().to_lowercase();
            if !query.is_empty() && !Self::search_matches(post, &query) {
                return false;
            }
        }
        true
    }

    fn search_matches(post: &Post, query: &str) -> bool {
        post.title.to_lowercase().contains(query)
            || post.excerpt.to_lowercase().contains(query)
            || post.content.to_lowercase().contains(query)
            || post.tags.iter().any(|t| t.to_lowercase().contains(query))
    }
}

/// Sortable post fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    PublishedAt,
    UpdatedAt,
    Views,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Single-field sort specification. Defaults to newest-first publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for PostSort {
    fn default() -> Self {
        Self {
            field: SortField::PublishedAt,
            order: SortOrder::Desc,
        }
    }
}

impl PostSort {
    /// Comparator for in-memory sorting. Ties keep the store's order.
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        let ordering = match self.field {
            SortField::PublishedAt => a.published_at.cmp(&b.published_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortField::Views => a.views.cmp(&b.views),
            SortField::Title => a.title.cmp(&b.title),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Offset-based pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl Pagination {
    /// Clamp page and limit to their minimum of 1.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

/// One page of a filtered listing, plus totals computed from the
/// unpaginated filtered count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

impl PostPage {
    pub fn total_pages_for(total: u64, limit: u64) -> u64 {
        total.div_ceil(limit.max(1))
    }
}
