use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reading speed used to derive `read_time` from the content word count.
const WORDS_PER_MINUTE: usize = 200;

/// Post entity - a single authored article with publication metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub slug: String,
    pub category: String,
    /// Denormalized tag names; insertion order carries no meaning.
    pub tags: Vec<String>,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub views: u64,
    pub featured: bool,
    pub is_published: bool,
    /// Estimated reading time in minutes, always derived from `content`.
    pub read_time: u32,
}

impl Post {
    /// Create a new draft post with generated ID and timestamps.
    pub fn new(
        author_id: Uuid,
        title: String,
        content: String,
        excerpt: String,
        slug: String,
        category: String,
        tags: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        let read_time = Self::read_time_for(&content);
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            content,
            excerpt,
            slug,
            category,
            tags,
            published_at: now,
            updated_at: now,
            views: 0,
            featured: false,
            is_published: false,
            read_time,
        }
    }

    /// Reading time in minutes for the given content: `ceil(words / 200)`.
    pub fn read_time_for(content: &str) -> u32 {
        let words = content.split_whitespace().count();
        words.div_ceil(WORDS_PER_MINUTE) as u32
    }

    /// Replace the content and recompute the derived reading time.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.read_time = Self::read_time_for(&self.content);
    }

    /// Flip the publication flag. `published_at` only advances on the
    /// unpublished -> published transition; later edits never touch it.
    pub fn set_published(&mut self, published: bool) {
        if published && !self.is_published {
            self.published_at = Utc::now();
        }
        self.is_published = published;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with_content(content: &str) -> Post {
        Post::new(
            Uuid::new_v4(),
            "Title".to_string(),
            content.to_string(),
            "Excerpt".to_string(),
            "title".to_string(),
            "General".to_string(),
            vec!["misc".to_string()],
        )
    }

    #[test]
    fn read_time_rounds_up() {
        assert_eq!(Post::read_time_for(""), 0);
        assert_eq!(Post::read_time_for("one"), 1);

        let exactly_two_hundred = vec!["word"; 200].join(" ");
        assert_eq!(Post::read_time_for(&exactly_two_hundred), 1);

        let two_hundred_and_one = vec!["word"; 201].join(" ");
        assert_eq!(Post::read_time_for(&two_hundred_and_one), 2);
    }

    #[test]
    fn set_content_recomputes_read_time() {
        let mut post = post_with_content("short");
        assert_eq!(post.read_time, 1);

        post.set_content(vec!["word"; 450].join(" "));
        assert_eq!(post.read_time, 3);
    }

    #[test]
    fn published_at_advances_only_on_publish_transition() {
        let mut post = post_with_content("hello world");
        let created_at = post.published_at;

        post.set_published(true);
        let first_published_at = post.published_at;
        assert!(first_published_at >= created_at);

        // Re-publishing an already published post keeps the original stamp.
        post.set_published(true);
        assert_eq!(post.published_at, first_published_at);

        // Unpublishing keeps it too.
        post.set_published(false);
        assert_eq!(post.published_at, first_published_at);
        assert!(!post.is_published);
    }
}
