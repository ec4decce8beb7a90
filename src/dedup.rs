use std::collections::HashSet;

use sha2::{Digest, Sha256};

use crate::models::Article;

/// Drops articles whose normalized URL or normalized title has already been
/// seen. The first occurrence wins, so callers put preferred sources first.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen_urls: HashSet<String>,
    seen_titles: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time an article is seen.
    pub fn insert(&mut self, article: &Article) -> bool {
        let url_key = normalize_url(&article.link).map(|u| content_hash(&u));
        let title_key = if article.has_url_title() {
            None
        } else {
            normalize_title(&article.title).map(|t| content_hash(&t))
        };

        let url_seen = url_key.as_ref().is_some_and(|k| self.seen_urls.contains(k));
        let title_seen = title_key.as_ref().is_some_and(|k| self.seen_titles.contains(k));
        if url_seen || title_seen {
            return false;
        }

        if let Some(k) = url_key {
            self.seen_urls.insert(k);
        }
        if let Some(k) = title_key {
            self.seen_titles.insert(k);
        }
        true
    }

    pub fn dedup(&mut self, articles: Vec<Article>) -> Vec<Article> {
        let before = articles.len();
        let kept: Vec<Article> = articles.into_iter().filter(|a| self.insert(a)).collect();

        if kept.len() < before {
            tracing::info!("Removed {} duplicate articles", before - kept.len());
        }
        kept
    }
}

pub fn content_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    format!("{:x}", digest)
}

/// `https://www.Example.com/a/b/?utm=1#top` -> `example.com/a/b`
pub fn normalize_url(url: &str) -> Option<String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_lowercase();
    let without_scheme = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let without_www = without_scheme.strip_prefix("www.").unwrap_or(without_scheme);
    let without_query = without_www
        .split(['?', '#'])
        .next()
        .unwrap_or(without_www);
    let normalized = without_query.trim_end_matches('/');

    (!normalized.is_empty()).then(|| normalized.to_string())
}

/// Lower-cased alphanumerics separated by single spaces. Placeholder titles
/// carry no identity and yield `None`.
pub fn normalize_title(title: &str) -> Option<String> {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    let normalized = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if normalized.is_empty() || normalized == "untitled" {
        return None;
    }
    Some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{url_title, ArticleOrigin};

    fn article(title: &str, link: &str, origin: ArticleOrigin) -> Article {
        Article {
            source: "Test".to_string(),
            title: title.to_string(),
            link: link.to_string(),
            content: String::new(),
            published: "10 March 2025".to_string(),
            pub_timestamp: 0,
            origin,
        }
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(
            normalize_url("https://www.Example.com/a/b/?utm_source=rss#top").as_deref(),
            Some("example.com/a/b")
        );
        assert_eq!(normalize_url("   "), None);
        assert_eq!(normalize_url("https://"), None);
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(
            normalize_title("  Informa: Buys -- TARSUS! ").as_deref(),
            Some("informa buys tarsus")
        );
        assert_eq!(normalize_title("Untitled"), None);
        assert_eq!(normalize_title("?!"), None);
    }

    #[test]
    fn test_dedup_by_url_or_title_keeps_first() {
        let articles = vec![
            article("Hyve sells unit", "https://example.com/hyve", ArticleOrigin::UserSource),
            article("Hyve Sells Unit!", "https://other.com/story", ArticleOrigin::Feed),
            article("Different headline", "http://www.example.com/hyve/", ArticleOrigin::Feed),
            article("Emerald appoints CFO", "", ArticleOrigin::Feed),
            article("Untitled", "", ArticleOrigin::Feed),
            article("Untitled", "", ArticleOrigin::Feed),
        ];

        let kept = Deduplicator::new().dedup(articles);

        assert_eq!(kept.len(), 4);
        assert_eq!(kept[0].origin, ArticleOrigin::UserSource);
        assert_eq!(kept[1].title, "Emerald appoints CFO");
        assert_eq!(kept[2].title, "Untitled");
        assert_eq!(kept[3].title, "Untitled");
    }

    #[test]
    fn test_url_derived_titles_are_not_title_keys() {
        let first = "https://www.exhibitionworld.co.uk/news/2025/03/10/informa-buys-tarsus";
        let second = "https://www.exhibitionworld.co.uk/news/2025/03/10/hyve-sells-unit";
        let articles = vec![
            article(&url_title(first), first, ArticleOrigin::UserSource),
            article(&url_title(second), second, ArticleOrigin::UserSource),
        ];
        assert_eq!(articles[0].title, articles[1].title);

        let kept = Deduplicator::new().dedup(articles);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].link, second);
    }

    #[test]
    fn test_content_hash_is_stable_hex() {
        let h = content_hash("example.com/a");
        assert_eq!(h.len(), 64);
        assert_eq!(h, content_hash("example.com/a"));
        assert_ne!(h, content_hash("example.com/b"));
    }
}
