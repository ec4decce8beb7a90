use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::shortlist::{lenient_index, null_as_default};

/// Stage 2 reply, keyed by section (`market_signals`, `deals`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub intro: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sections: HashMap<String, DraftSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftSection {
    #[serde(deserialize_with = "null_as_default")]
    pub stories: Vec<DraftStory>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftStory {
    #[serde(deserialize_with = "lenient_index")]
    pub shortlist_index: Option<usize>,
    #[serde(deserialize_with = "null_as_default")]
    pub headline: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    pub sub_theme: Option<String>,
    pub why_selected: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Story {
    pub headline: String,
    pub summary: String,
    pub source: String,
    pub link: String,
    pub published: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_theme: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    pub title: String,
    pub icon: String,
    pub stories: Vec<Story>,
    pub sub_themes: Option<Vec<String>>,
}

impl Section {
    pub fn stories_in<'a>(&'a self, sub_theme: &'a str) -> impl Iterator<Item = &'a Story> + 'a {
        self.stories
            .iter()
            .filter(move |s| s.sub_theme.as_deref() == Some(sub_theme))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsletterContent {
    pub intro: String,
    pub sections: Vec<Section>,
}

impl NewsletterContent {
    pub fn total_stories(&self) -> usize {
        self.sections.iter().map(|s| s.stories.len()).sum()
    }
}
