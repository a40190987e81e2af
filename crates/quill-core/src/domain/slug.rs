//! Slug validation and collision handling.
//!
//! Slugs are URL-safe identifiers: Unicode letters and digits separated by
//! single hyphens. Collisions are not rejected; callers fall back to a
//! timestamp-suffixed variant instead.

use chrono::Utc;

/// Check a slug against the canonical pattern: non-empty, only letters,
/// digits and hyphens, with no leading, trailing or doubled hyphen.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return false;
    }
    slug.chars().all(|c| c.is_alphanumeric() || c == '-')
}

/// Disambiguate a colliding slug by appending a millisecond timestamp.
///
/// Best-effort only: two writers racing in the same millisecond can still
/// produce the same suffix, which is acceptable at personal-blog traffic.
pub fn with_collision_suffix(slug: &str) -> String {
    format!("{}-{}", slug, Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_unicode_slugs() {
        assert!(is_valid_slug("hello-world"));
        assert!(is_valid_slug("rust2024"));
        assert!(is_valid_slug("러스트-입문"));
        assert!(is_valid_slug("안녕하세요"));
    }

    #[test]
    fn rejects_malformed_slugs() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug("with/slash"));
    }

    #[test]
    fn collision_suffix_is_numeric() {
        let suffixed = with_collision_suffix("my-post");
        let suffix = suffixed.strip_prefix("my-post-").unwrap();
        assert!(suffix.parse::<i64>().is_ok());
        assert!(is_valid_slug(&suffixed));
    }
}
