use std::collections::HashSet;

use crate::brief::sections::{SectionSpec, SECTIONS};
use crate::models::{NewsletterContent, Section, ShortlistItem, Story, WriterResponse};

/// Builds the final sections from the writer's drafts. Each draft points at
/// the shortlist by 1-based `shortlist_index`; drafts that point nowhere, or
/// at an item already placed in an earlier section, are dropped.
pub fn assemble_sections(
    shortlist: &[ShortlistItem],
    prompted: usize,
    mut response: WriterResponse,
    stories_per_section: usize,
) -> NewsletterContent {
    let visible = prompted.min(shortlist.len());
    let mut used: HashSet<usize> = HashSet::new();

    let sections = SECTIONS
        .iter()
        .map(|spec| {
            let drafts = response
                .sections
                .remove(spec.key)
                .map(|s| s.stories)
                .unwrap_or_default();

            let mut stories = Vec::new();
            for draft in drafts {
                if stories.len() >= stories_per_section {
                    break;
                }

                let Some(idx) = draft
                    .shortlist_index
                    .and_then(|p| p.checked_sub(1))
                    .filter(|idx| *idx < visible)
                else {
                    tracing::warn!(
                        "{}: story with shortlist_index {:?} dropped",
                        spec.key,
                        draft.shortlist_index
                    );
                    continue;
                };

                if !used.insert(idx) {
                    tracing::debug!("{}: shortlist item {} already placed", spec.key, idx + 1);
                    continue;
                }

                let article = &shortlist[idx].article;
                let headline = if draft.headline.trim().is_empty() {
                    article.title.clone()
                } else {
                    draft.headline.trim().to_string()
                };

                stories.push(Story {
                    headline,
                    summary: draft.summary.trim().to_string(),
                    source: article.source.clone(),
                    link: article.link.clone(),
                    published: article.published.clone(),
                    sub_theme: spec.resolve_sub_theme(draft.sub_theme.as_deref()),
                });
            }

            build_section(spec, stories)
        })
        .collect();

    for key in response.sections.keys() {
        tracing::debug!("Ignoring unknown section from writer: {}", key);
    }

    NewsletterContent {
        intro: response.intro.trim().to_string(),
        sections,
    }
}

fn build_section(spec: &SectionSpec, stories: Vec<Story>) -> Section {
    Section {
        key: spec.key.to_string(),
        title: spec.title.to_string(),
        icon: spec.icon.to_string(),
        stories,
        sub_themes: spec
            .has_sub_themes()
            .then(|| spec.sub_themes.iter().map(|t| t.to_string()).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, ArticleOrigin, DraftSection, DraftStory, FilteredArticle};

    fn item(title: &str) -> ShortlistItem {
        ShortlistItem::new(
            Article {
                source: "Exhibition World".to_string(),
                title: title.to_string(),
                link: format!("https://example.com/{}", title),
                content: String::new(),
                published: "09 March 2025".to_string(),
                pub_timestamp: 0,
                origin: ArticleOrigin::Feed,
            },
            FilteredArticle::default(),
        )
    }

    fn draft(index: usize, headline: &str, sub_theme: Option<&str>) -> DraftStory {
        DraftStory {
            shortlist_index: Some(index),
            headline: headline.to_string(),
            summary: "Para one.\n\nPara two.".to_string(),
            sub_theme: sub_theme.map(String::from),
            why_selected: None,
        }
    }

    fn response(sections: Vec<(&str, Vec<DraftStory>)>) -> WriterResponse {
        WriterResponse {
            intro: "  A busy week.  ".to_string(),
            sections: sections
                .into_iter()
                .map(|(k, stories)| (k.to_string(), DraftSection { stories }))
                .collect(),
        }
    }

    #[test]
    fn test_sections_follow_catalog_order() {
        let shortlist = vec![item("a"), item("b"), item("c")];
        let content = assemble_sections(
            &shortlist,
            30,
            response(vec![
                ("hires_fires", vec![draft(3, "CFO leaves", None)]),
                ("deals", vec![draft(2, "", None)]),
                ("market_signals", vec![draft(1, "Rates bite", Some("macro economy"))]),
            ]),
            3,
        );

        assert_eq!(content.intro, "A busy week.");
        let keys: Vec<_> = content.sections.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["market_signals", "deals", "hires_fires"]);

        let market = &content.sections[0];
        assert_eq!(market.sub_themes.as_ref().map(Vec::len), Some(2));
        assert_eq!(market.stories[0].sub_theme.as_deref(), Some("Macro Economy"));
        assert_eq!(market.stories_in("Macro Economy").count(), 1);

        // empty headline falls back to the article title
        assert_eq!(content.sections[1].stories[0].headline, "b");
        assert_eq!(content.sections[1].stories[0].link, "https://example.com/b");
        assert!(content.sections[1].sub_themes.is_none());
        assert_eq!(content.total_stories(), 3);
    }

    #[test]
    fn test_bad_indices_duplicates_and_cap() {
        let shortlist = vec![item("a"), item("b"), item("c"), item("d")];
        let content = assemble_sections(
            &shortlist,
            30,
            response(vec![
                (
                    "deals",
                    vec![
                        draft(0, "zero", None),
                        draft(9, "nine", None),
                        draft(1, "one", None),
                        draft(2, "two", None),
                        draft(3, "three", None),
                    ],
                ),
                ("hires_fires", vec![draft(1, "repeat", None), draft(4, "four", None)]),
            ]),
            2,
        );

        let deals: Vec<_> = content.sections[1].stories.iter().map(|s| s.headline.as_str()).collect();
        assert_eq!(deals, vec!["one", "two"]);

        let hires: Vec<_> = content.sections[2].stories.iter().map(|s| s.headline.as_str()).collect();
        assert_eq!(hires, vec!["four"]);

        assert!(content.sections[0].stories.is_empty());
    }
}
