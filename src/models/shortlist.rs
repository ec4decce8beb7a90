use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::article::Article;

pub const MAX_TOTAL_SCORE: u8 = 25;

/// Stage 1 reply: the articles the model kept, each pointing back to the
/// prompt by 1-based position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterResponse {
    pub included: Vec<FilteredArticle>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilteredArticle {
    #[serde(deserialize_with = "lenient_index")]
    pub article_index: Option<usize>,
    #[serde(deserialize_with = "null_as_default")]
    pub primary_lens: String,
    #[serde(deserialize_with = "null_as_default")]
    pub why_it_matters: String,
    #[serde(deserialize_with = "null_as_default")]
    pub board_question: String,
    #[serde(deserialize_with = "null_as_default")]
    pub scores: Scores,
    #[serde(deserialize_with = "null_as_default")]
    pub include_tier: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scores {
    #[serde(deserialize_with = "lenient_score")]
    pub strategic_relevance: f32,
    #[serde(deserialize_with = "lenient_score")]
    pub economic_impact: f32,
    #[serde(deserialize_with = "lenient_score")]
    pub decision_usefulness: f32,
    #[serde(deserialize_with = "lenient_score")]
    pub signal_strength: f32,
    #[serde(deserialize_with = "lenient_score")]
    pub transferability: f32,
    #[serde(deserialize_with = "lenient_total")]
    pub total: Option<f32>,
}

impl Scores {
    /// The model's total when it gave one, otherwise the sum of the five
    /// dimensions. Always within `0..=25`.
    pub fn total_score(&self) -> u8 {
        let raw = self.total.unwrap_or_else(|| {
            self.strategic_relevance
                + self.economic_impact
                + self.decision_usefulness
                + self.signal_strength
                + self.transferability
        });
        if raw.is_nan() {
            return 0;
        }
        raw.round().clamp(0.0, MAX_TOTAL_SCORE as f32) as u8
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlistItem {
    pub article: Article,
    pub primary_lens: String,
    pub why_it_matters: String,
    pub board_question: String,
    pub scores: Scores,
    pub total_score: u8,
    pub include_tier: String,
    pub notes: Option<String>,
}

impl ShortlistItem {
    pub fn new(article: Article, filtered: FilteredArticle) -> Self {
        let total_score = filtered.scores.total_score();
        Self {
            article,
            primary_lens: filtered.primary_lens,
            why_it_matters: filtered.why_it_matters,
            board_question: filtered.board_question,
            scores: filtered.scores,
            total_score,
            include_tier: filtered.include_tier,
            notes: filtered.notes,
        }
    }
}

/// Accepts `3`, `3.0` or `"3"`; anything else becomes `None`.
pub(crate) fn lenient_index<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .map(|n| n as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn score_value(value: Value) -> Option<f32> {
    match value {
        Value::Number(n) => n.as_f64().map(|f| f as f32),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts `4`, `4.5` or `"4"`; `null` and anything unreadable score 0.
fn lenient_score<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(score_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Like [`lenient_score`], but an unreadable total is treated as absent so
/// the dimension sum is used instead.
fn lenient_total<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(score_value(Value::deserialize(deserializer)?))
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
