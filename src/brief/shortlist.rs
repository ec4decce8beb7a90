use std::cmp::Reverse;

use crate::models::{Article, FilterResponse, ShortlistItem};

/// Maps the model's 1-based `article_index` values back onto `articles`
/// (only the first `prompted` were shown) and ranks the result: higher total
/// first, then user-provided sources, then newer articles.
pub fn build_shortlist(
    articles: &[Article],
    prompted: usize,
    response: FilterResponse,
) -> Vec<ShortlistItem> {
    let visible = prompted.min(articles.len());
    let mut seen = vec![false; visible];
    let mut shortlist = Vec::with_capacity(response.included.len());

    for filtered in response.included {
        let Some(position) = filtered.article_index else {
            tracing::warn!("Shortlist entry without article_index dropped");
            continue;
        };

        let idx = match position.checked_sub(1) {
            Some(idx) if idx < visible => idx,
            _ => {
                tracing::warn!("article_index {} out of range (1..={})", position, visible);
                continue;
            }
        };

        if std::mem::replace(&mut seen[idx], true) {
            tracing::debug!("article_index {} listed twice, keeping first", position);
            continue;
        }

        shortlist.push(ShortlistItem::new(articles[idx].clone(), filtered));
    }

    rank(&mut shortlist);
    shortlist
}

pub fn rank(shortlist: &mut [ShortlistItem]) {
    shortlist.sort_by_key(|item| {
        (
            Reverse(item.total_score),
            !item.article.is_user_provided(),
            Reverse(item.article.pub_timestamp),
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleOrigin, FilteredArticle, Scores};

    fn article(title: &str, ts: i64, origin: ArticleOrigin) -> Article {
        Article {
            source: "Test".to_string(),
            title: title.to_string(),
            link: String::new(),
            content: String::new(),
            published: String::new(),
            pub_timestamp: ts,
            origin,
        }
    }

    fn pick(index: usize, total: f32) -> FilteredArticle {
        FilteredArticle {
            article_index: Some(index),
            scores: Scores {
                total: Some(total),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_ranking_order() {
        let articles = vec![
            article("old feed", 100, ArticleOrigin::Feed),
            article("new feed", 300, ArticleOrigin::Feed),
            article("user", 200, ArticleOrigin::UserSource),
            article("top", 50, ArticleOrigin::Feed),
        ];
        let response = FilterResponse {
            included: vec![pick(1, 18.0), pick(2, 18.0), pick(3, 18.0), pick(4, 23.0)],
        };

        let shortlist = build_shortlist(&articles, 60, response);
        let titles: Vec<_> = shortlist.iter().map(|s| s.article.title.as_str()).collect();

        assert_eq!(titles, vec!["top", "user", "new feed", "old feed"]);
        assert_eq!(shortlist[0].total_score, 23);
    }

    #[test]
    fn test_out_of_range_and_duplicate_indices_are_dropped() {
        let articles = vec![
            article("a", 1, ArticleOrigin::Feed),
            article("b", 2, ArticleOrigin::Feed),
            article("beyond prompt", 3, ArticleOrigin::Feed),
        ];
        let response = FilterResponse {
            included: vec![
                pick(0, 20.0),
                pick(2, 20.0),
                pick(2, 25.0),
                pick(3, 20.0),
                pick(99, 20.0),
                FilteredArticle::default(),
            ],
        };

        let shortlist = build_shortlist(&articles, 2, response);

        assert_eq!(shortlist.len(), 1);
        assert_eq!(shortlist[0].article.title, "b");
        assert_eq!(shortlist[0].total_score, 20);
    }
}
