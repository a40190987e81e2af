//! Public blog statistics and the author-exclusion policy applied to them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aggregate counters shown on the public site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogStats {
    pub total_posts: u64,
    pub total_views: u64,
    pub category_count: u64,
    pub tag_count: u64,
}

/// Authors whose posts are excluded from public totals.
///
/// Configured rather than hard-coded so operators can hide e.g. a site
/// owner's test account without a code change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsPolicy {
    pub excluded_authors: Vec<Uuid>,
}

impl StatsPolicy {
    pub fn new(excluded_authors: Vec<Uuid>) -> Self {
        Self { excluded_authors }
    }

    /// Load from `STATS_EXCLUDED_AUTHORS`, a comma-separated UUID list.
    /// Unparseable entries are skipped with a warning.
    pub fn from_env() -> Self {
        let excluded_authors = std::env::var("STATS_EXCLUDED_AUTHORS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .filter_map(|s| match s.parse::<Uuid>() {
                        Ok(id) => Some(id),
                        Err(_) => {
                            tracing::warn!(value = s, "Skipping invalid excluded-author id");
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { excluded_authors }
    }

    pub fn excludes(&self, author_id: Uuid) -> bool {
        self.excluded_authors.contains(&author_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_policy_excludes_nobody() {
        let policy = StatsPolicy::default();
        assert!(!policy.excludes(Uuid::new_v4()));
    }

    #[test]
    fn policy_excludes_listed_authors_only() {
        let hidden = Uuid::new_v4();
        let policy = StatsPolicy::new(vec![hidden]);
        assert!(policy.excludes(hidden));
        assert!(!policy.excludes(Uuid::new_v4()));
    }
}
