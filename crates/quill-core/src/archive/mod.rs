//! Year -> Month archive aggregation over published posts.
//!
//! A pure, stateless transformation: the hierarchy is rebuilt from the
//! current post set on every call and discarded after use. Filtering an
//! already-grouped archive produces a fresh structure and recomputes every
//! derived counter from the surviving posts.

use std::collections::{BTreeMap, HashSet};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::domain::Post;

/// Month display labels, matching the site's display locale.
const MONTH_LABELS: [&str; 12] = [
    "1월", "2월", "3월", "4월", "5월", "6월", "7월", "8월", "9월", "10월", "11월", "12월",
];

/// Archive hierarchy keyed by year label. The ordered map keeps iteration
/// deterministic; callers render newest-first by iterating in reverse.
pub type ArchiveData = BTreeMap<String, YearData>;

/// One year bucket: its flat post list plus per-month sub-buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearData {
    pub year: String,
    /// All posts of the year, newest-first by `published_at`.
    pub posts: Vec<Post>,
    /// Month buckets, newest-month-first.
    pub months: Vec<MonthData>,
    pub post_count: usize,
    pub total_views: u64,
}

/// One month bucket within a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthData {
    /// Calendar month, 1-12.
    pub month: u32,
    pub label: String,
    /// Posts in encounter order; stats tie-breaks rely on this order.
    pub posts: Vec<Post>,
    pub post_count: usize,
}

/// Derived statistics for a year bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearStats {
    pub most_viewed: Option<Post>,
    pub category_count: usize,
    pub tag_count: usize,
    pub total_views: u64,
    pub average_views: u64,
    /// Per-month breakdown, recomputed from each bucket's posts.
    pub months: Vec<MonthBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBreakdown {
    pub label: String,
    pub post_count: usize,
    pub total_views: u64,
}

/// Derived statistics for a month bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthStats {
    pub most_viewed: Option<Post>,
    pub category_count: usize,
    pub tag_count: usize,
    pub total_views: u64,
    pub average_views: u64,
}

/// Group posts into year and month buckets keyed by `published_at`.
///
/// Single pass; buckets are created lazily on first sight. Afterwards the
/// months of each year are sorted newest-first and each year's flat post
/// list newest-first by publication date, so the result does not depend on
/// the input order.
pub fn group_by_year_and_month(posts: &[Post]) -> ArchiveData {
    let mut archive = ArchiveData::new();

    for post in posts {
        let year = post.published_at.year().to_string();
        let month = post.published_at.month();

        let year_data = archive.entry(year.clone()).or_insert_with(|| YearData {
            year,
            posts: Vec::new(),
            months: Vec::new(),
            post_count: 0,
            total_views: 0,
        });

        year_data.posts.push(post.clone());
        year_data.post_count += 1;
        year_data.total_views += post.views;

        match year_data.months.iter_mut().find(|m| m.month == month) {
            Some(bucket) => {
                bucket.posts.push(post.clone());
                bucket.post_count += 1;
            }
            None => year_data.months.push(MonthData {
                month,
                label: month_label(month),
                posts: vec![post.clone()],
                post_count: 1,
            }),
        }
    }

    for year_data in archive.values_mut() {
        year_data.months.sort_by(|a, b| b.month.cmp(&a.month));
        year_data
            .posts
            .sort_by(|a, b| b.published_at.cmp(&a.published_at));
    }

    archive
}

/// Statistics for one year bucket, recomputed from its posts.
pub fn year_stats(year: &YearData) -> YearStats {
    let total_views = view_sum(&year.posts);
    let months = year
        .months
        .iter()
        .map(|m| MonthBreakdown {
            label: m.label.clone(),
            post_count: m.posts.len(),
            total_views: view_sum(&m.posts),
        })
        .collect();

    YearStats {
        most_viewed: most_viewed(&year.posts),
        category_count: distinct_categories(&year.posts),
        tag_count: distinct_tags(&year.posts),
        total_views,
        average_views: average_views(total_views, year.posts.len()),
        months,
    }
}

/// Statistics for one month bucket, recomputed from its posts.
pub fn month_stats(month: &MonthData) -> MonthStats {
    let total_views = view_sum(&month.posts);

    MonthStats {
        most_viewed: most_viewed(&month.posts),
        category_count: distinct_categories(&month.posts),
        tag_count: distinct_tags(&month.posts),
        total_views,
        average_views: average_views(total_views, month.posts.len()),
    }
}

/// Re-filter a grouped archive by free-text search and category without
/// regrouping. Months with no surviving post are dropped, then years with
/// no surviving month; every counter of a surviving bucket is recomputed
/// from the filtered subset. The input archive is left untouched.
pub fn filter_archive(
    archive: &ArchiveData,
    search: &str,
    category: Option<&str>,
) -> ArchiveData {
    let query = search.trim().to_lowercase();
    let mut filtered = ArchiveData::new();

    for (label, year_data) in archive {
        let mut months = Vec::new();
        for month in &year_data.months {
            let posts: Vec<Post> = month
                .posts
                .iter()
                .filter(|post| matches_archive_filter(post, &query, category))
                .cloned()
                .collect();
            if posts.is_empty() {
                continue;
            }
            months.push(MonthData {
                month: month.month,
                label: month.label.clone(),
                post_count: posts.len(),
                posts,
            });
        }

        if months.is_empty() {
            continue;
        }

        let mut posts: Vec<Post> = months
            .iter()
            .flat_map(|m| m.posts.iter().cloned())
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        filtered.insert(
            label.clone(),
            YearData {
                year: year_data.year.clone(),
                post_count: posts.len(),
                total_views: view_sum(&posts),
                posts,
                months,
            },
        );
    }

    filtered
}

/// Archive filter predicate: exact category match when requested, and a
/// lowercase substring search over title, excerpt, category and tags.
/// Unlike the repository search, post content is not consulted here.
fn matches_archive_filter(post: &Post, query: &str, category: Option<&str>) -> bool {
    if let Some(category) = category {
        if post.category != category {
            return false;
        }
    }
    if query.is_empty() {
        return true;
    }
    post.title.to_lowercase().contains(query)
        || post.excerpt.to_lowercase().contains(query)
        || post.category.to_lowercase().contains(query)
        || post.tags.iter().any(|t| t.to_lowercase().contains(query))
}

fn month_label(month: u32) -> String {
    MONTH_LABELS[(month - 1) as usize].to_string()
}

fn view_sum(posts: &[Post]) -> u64 {
    posts.iter().map(|p| p.views).sum()
}

/// First-wins fold: a later post replaces the champion only with strictly
/// more views, so ties resolve to the leftmost post in the current order.
fn most_viewed(posts: &[Post]) -> Option<Post> {
    posts
        .iter()
        .fold(None::<&Post>, |best, post| match best {
            Some(champion) if champion.views >= post.views => Some(champion),
            _ => Some(post),
        })
        .cloned()
}

fn distinct_categories(posts: &[Post]) -> usize {
    posts
        .iter()
        .map(|p| p.category.as_str())
        .collect::<HashSet<_>>()
        .len()
}

fn distinct_tags(posts: &[Post]) -> usize {
    posts
        .iter()
        .flat_map(|p| p.tags.iter().map(String::as_str))
        .collect::<HashSet<_>>()
        .len()
}

fn average_views(total: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    (total as f64 / count as f64).round() as u64
}
