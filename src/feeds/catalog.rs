use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

const DEFAULT_FEEDS: &[(&str, &str)] = &[
    // Exhibition & events industry
    ("exhibition_world", "https://www.exhibitionworld.co.uk/feed"),
    ("exhibition_news", "https://www.exhibitionnews.co.uk/feed"),
    ("mash_media", "https://www.mashmedia.net/feed/"),
    ("conference_news", "https://www.conference-news.co.uk/feed"),
    ("access_aa", "https://accessaa.co.uk/feed/"),
    ("eventindustrynews", "https://www.eventindustrynews.com/feed"),
    ("tsnn", "https://www.tsnn.com/feed"),
    ("exhibitor_online", "https://www.exhibitoronline.com/news/rss.xml"),
    // B2B media & publishing
    ("fipp", "https://www.fipp.com/feed/"),
    ("inpublishing", "https://www.inpublishing.co.uk/feed"),
    ("pressgazette", "https://pressgazette.co.uk/feed/"),
    ("journalism_co_uk", "https://www.journalism.co.uk/feed/"),
    // Deal flow
    ("pe_hub_media", "https://www.pehub.com/feed/"),
    // Marketing & events adjacent
    ("event_marketer", "https://www.eventmarketer.com/feed/"),
    ("bizbash", "https://www.bizbash.com/rss.xml"),
    ("skift_meetings", "https://skift.com/meetings/feed/"),
];

pub fn default_feeds() -> Vec<FeedSource> {
    DEFAULT_FEEDS
        .iter()
        .map(|(name, url)| FeedSource::new(*name, *url))
        .collect()
}

/// Loads a replacement catalog from a JSON object of `{"name": "url"}` pairs.
pub fn load_feed_file(path: &Path) -> Result<Vec<FeedSource>> {
    let raw = std::fs::read_to_string(path)?;
    parse_feed_catalog(&raw)
}

pub fn parse_feed_catalog(raw: &str) -> Result<Vec<FeedSource>> {
    let map: BTreeMap<String, String> = serde_json::from_str(raw)?;

    let feeds: Vec<FeedSource> = map
        .into_iter()
        .filter(|(_, url)| url.starts_with("http://") || url.starts_with("https://"))
        .map(|(name, url)| FeedSource::new(name, url))
        .collect();

    if feeds.is_empty() {
        return Err(Error::Config(
            "feed file contains no http(s) feed URLs".to_string(),
        ));
    }

    Ok(feeds)
}
