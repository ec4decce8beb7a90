use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{header, Client};
use tokio::sync::Semaphore;

use crate::error::{Error, Result};
use crate::feeds::catalog::FeedSource;
use crate::models::{display_date, Article, ArticleOrigin};
use crate::text::{clean_feed_text, feed_display_name, truncate_chars};

/// Only the head of each feed is considered.
pub const MAX_ENTRIES_PER_FEED: usize = 15;
pub const MAX_FEED_CONTENT_CHARS: usize = 2000;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_static(USER_AGENT));
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(
                "application/rss+xml, application/atom+xml, application/xml;q=0.9, */*;q=0.8",
            ),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client })
    }

    pub async fn fetch_feed(
        &self,
        feed: &FeedSource,
        cutoff: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Article>> {
        tracing::debug!("Fetching {} ({})", feed.name, feed.url);

        let response = self
            .client
            .get(&feed.url)
            .send()
            .await
            .map_err(|e| Error::feed(&feed.name, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::feed(&feed.name, format!("HTTP {}", status)));
        }

        let bytes = response.bytes().await?;
        parse_feed(&bytes, &feed.name, cutoff, now)
    }

    /// Fetches every feed, newest articles first. A feed that fails is
    /// logged and skipped.
    pub async fn fetch_all(
        &self,
        feeds: &[FeedSource],
        days_back: i64,
        concurrency_limit: usize,
    ) -> Vec<Article> {
        let now = Utc::now();
        let cutoff = now - chrono::Duration::days(days_back);
        let semaphore = Semaphore::new(concurrency_limit.max(1));

        let pb = ProgressBar::new(feeds.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} feeds")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let fetches = feeds.iter().map(|feed| {
            let semaphore = &semaphore;
            let pb = pb.clone();
            async move {
                let _permit = semaphore.acquire().await.ok()?;
                let result = self.fetch_feed(feed, cutoff, now).await;
                pb.inc(1);

                match result {
                    Ok(articles) if articles.is_empty() => {
                        tracing::warn!("{}: no recent entries", feed.name);
                        None
                    }
                    Ok(articles) => {
                        tracing::debug!("{}: {} articles", feed.name, articles.len());
                        Some(articles)
                    }
                    Err(e) => {
                        tracing::warn!("{}", e);
                        None
                    }
                }
            }
        });

        let results = join_all(fetches).await;
        pb.finish_and_clear();

        let mut articles: Vec<Article> = results.into_iter().flatten().flatten().collect();
        sort_newest_first(&mut articles);

        tracing::info!("Fetched {} articles from {} feeds", articles.len(), feeds.len());
        articles
    }
}

pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.pub_timestamp.cmp(&a.pub_timestamp));
}

/// Turns a raw RSS/Atom document into articles published on or after `cutoff`.
/// Entries without any date are treated as published `now`.
pub fn parse_feed(
    bytes: &[u8],
    source_name: &str,
    cutoff: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<Vec<Article>> {
    let feed = feed_rs::parser::parse(bytes)
        .map_err(|e| Error::feed(source_name, format!("unparseable feed: {}", e)))?;

    let source = feed_display_name(source_name);

    let articles = feed
        .entries
        .into_iter()
        .take(MAX_ENTRIES_PER_FEED)
        .filter_map(|entry| {
            let published = entry.published.or(entry.updated).unwrap_or(now);
            if published < cutoff {
                return None;
            }

            let raw_content = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default();
            let content = truncate_chars(&clean_feed_text(&raw_content), MAX_FEED_CONTENT_CHARS);

            let title = entry
                .title
                .map(|t| clean_feed_text(&t.content))
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Untitled".to_string());

            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default();

            Some(Article {
                source: source.clone(),
                title,
                link,
                content,
                published: display_date(published),
                pub_timestamp: published.timestamp(),
                origin: ArticleOrigin::Feed,
            })
        })
        .collect();

    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rss(items: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Trade Wire</title><link>https://example.com</link>
<description>news</description>{}</channel></rss>"#,
            items
        )
    }

    fn item(title: &str, date: &str) -> String {
        format!(
            "<item><title>{}</title><link>https://example.com/{}</link>\
             <description>&lt;p&gt;Deal   news&lt;/p&gt;</description>\
             <pubDate>{}</pubDate></item>",
            title,
            title.to_lowercase().replace(' ', "-"),
            date
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_feed_applies_date_window() {
        let xml = rss(&[
            item("Fresh Deal", "Sun, 09 Mar 2025 08:00:00 GMT"),
            item("Stale Deal", "Sat, 01 Feb 2025 08:00:00 GMT"),
        ]
        .concat());
        let cutoff = now() - chrono::Duration::days(7);

        let articles = parse_feed(xml.as_bytes(), "exhibition_world", cutoff, now()).unwrap();

        assert_eq!(articles.len(), 1);
        let a = &articles[0];
        assert_eq!(a.title, "Fresh Deal");
        assert_eq!(a.source, "Exhibition World");
        assert_eq!(a.link, "https://example.com/fresh-deal");
        assert_eq!(a.content, "Deal news");
        assert_eq!(a.published, "09 March 2025");
        assert_eq!(a.origin, ArticleOrigin::Feed);
    }

    #[test]
    fn test_parse_feed_undated_entries_count_as_now() {
        let xml = rss("<item><title>No Date</title><link>https://example.com/x</link></item>");
        let cutoff = now() - chrono::Duration::days(7);

        let articles = parse_feed(xml.as_bytes(), "tsnn", cutoff, now()).unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].pub_timestamp, now().timestamp());
        assert_eq!(articles[0].content, "");
    }

    #[test]
    fn test_parse_feed_caps_entries() {
        let items: String = (0..20)
            .map(|i| item(&format!("Story {}", i), "Sun, 09 Mar 2025 08:00:00 GMT"))
            .collect();
        let cutoff = now() - chrono::Duration::days(7);

        let articles = parse_feed(rss(&items).as_bytes(), "fipp", cutoff, now()).unwrap();
        assert_eq!(articles.len(), MAX_ENTRIES_PER_FEED);
    }

    fn dated(title: &str, pub_timestamp: i64) -> Article {
        Article {
            source: "Trade Wire".to_string(),
            title: title.to_string(),
            link: String::new(),
            content: String::new(),
            published: String::new(),
            pub_timestamp,
            origin: ArticleOrigin::Feed,
        }
    }

    #[test]
    fn test_sort_newest_first_merges_feeds() {
        let mut articles = vec![dated("a-old", 100), dated("a-new", 300)];
        articles.extend(vec![dated("b-mid", 200), dated("b-newest", 400)]);

        sort_newest_first(&mut articles);

        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["b-newest", "a-new", "b-mid", "a-old"]);
    }

    #[tokio::test]
    async fn test_fetch_all_skips_failing_feeds() {
        let client = FeedClient::new(2).unwrap();
        let feeds = vec![
            FeedSource {
                name: "closed_port".to_string(),
                url: "http://127.0.0.1:1/feed".to_string(),
            },
            FeedSource {
                name: "also_closed".to_string(),
                url: "http://127.0.0.1:1/rss".to_string(),
            },
        ];

        let articles = client.fetch_all(&feeds, 7, 2).await;

        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_feed_reports_source_on_failure() {
        let client = FeedClient::new(2).unwrap();
        let feed = FeedSource {
            name: "closed_port".to_string(),
            url: "http://127.0.0.1:1/feed".to_string(),
        };

        let err = client.fetch_feed(&feed, now(), now()).await.unwrap_err();

        assert!(matches!(err, Error::Feed { ref source_name, .. } if source_name == "closed_port"));
    }

    #[test]
    fn test_parse_feed_rejects_garbage() {
        let err = parse_feed(b"not a feed", "bizbash", now(), now()).unwrap_err();
        assert!(matches!(err, Error::Feed { .. }));
    }
}
