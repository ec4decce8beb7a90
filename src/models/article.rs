use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::text::truncate_chars;

/// Display format used for every date shown to readers, e.g. `07 March 2025`.
pub const DISPLAY_DATE_FORMAT: &str = "%d %B %Y";

pub fn display_date(date: DateTime<Utc>) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Title given to a bare user-provided URL: `Source: <first 50 chars>...`.
pub fn url_title(url: &str) -> String {
    format!("Source: {}...", truncate_chars(url, 50))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ArticleOrigin {
    Feed,
    UserSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub source: String,
    pub title: String,
    pub link: String,
    pub content: String,
    pub published: String,
    pub pub_timestamp: i64,
    pub origin: ArticleOrigin,
}

impl Article {
    pub fn is_user_provided(&self) -> bool {
        self.origin == ArticleOrigin::UserSource
    }

    /// The title was made up from the link and says nothing about the story.
    pub fn has_url_title(&self) -> bool {
        !self.link.is_empty() && self.title == url_title(&self.link)
    }

    /// A user-provided article stamped with `now`.
    pub fn user_source(
        source: impl Into<String>,
        title: impl Into<String>,
        link: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
            link: link.into(),
            content: content.into(),
            published: display_date(now),
            pub_timestamp: now.timestamp(),
            origin: ArticleOrigin::UserSource,
        }
    }
}
