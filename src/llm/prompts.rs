use crate::brief::sections::SECTIONS;
use crate::models::{Article, ShortlistItem};
use crate::text::truncate_chars;

/// Articles beyond this position are never shown to the model.
pub const MAX_ARTICLES_IN_PROMPT: usize = 60;
pub const MAX_SHORTLIST_IN_PROMPT: usize = 30;
pub const PROMPT_CONTENT_CHARS: usize = 900;

const USER_FLAG: &str = " [USER-PROVIDED SOURCE - PRIORITIZE]";

pub const FILTER_SYSTEM_PROMPT: &str = r#"You are the research desk for a board-level intelligence newsletter in global B2B media & live events.

AI BRIEF: ARTICLE FILTERING & PRIORITISATION (BOARD-LEVEL)

Role:
- You are a senior industry intelligence analyst.
Audience:
- PE investors, board directors, CEOs, corp dev leaders in global B2B media & live events.

Objective:
- Filter and prioritise only articles that reveal structural change or economically meaningful shifts.
- Focus on implications for capital allocation, valuation, strategy, revenue quality, margins, or risk.
Exclude:
- Product launches, vendor marketing, event-tech hype, tactical "how-to", generic macro with no industry transmission.

Core Analytical Lenses (article must fit at least one):
1) Macro & Capital
2) Formats & Attention
3) Geography & Exposure
4) Pricing, Yield & Revenue Quality
5) Portfolio Strategy & M&A
6) Cost Structure & Operating Leverage

Mandatory questions:
- What is the signal?
- Why does this matter economically?
- Who is affected?
- Structural or cyclical?
- What board-level question does it raise?

Scoring (/25): 0-5 each:
- Strategic relevance
- Economic impact
- Decision usefulness
- Signal strength
- Transferability

Interpretation:
- 20-25 Must include
- 14-19 Include if space allows
- <14 Exclude"#;

const FILTER_TASK: &str = r#"TASK:
1) Exclude anything that does not meet the inclusion criteria.
2) For each INCLUDED article:
   - Assign ONE primary lens from the six.
   - Write why_it_matters (2-3 sentences; implications only, not a summary).
   - Write board_question (1 sentence).
   - Score each dimension 0-5 and provide total /25.
3) Rank included articles by:
   - total_score desc,
   - then user_provided first,
   - then recency.

OUTPUT:
Return ONLY valid JSON in exactly this structure:
{
  "included": [
    {
      "article_index": 1,
      "primary_lens": "Pricing, Yield & Revenue Quality",
      "why_it_matters": "...",
      "board_question": "...",
      "scores": {
        "strategic_relevance": 0,
        "economic_impact": 0,
        "decision_usefulness": 0,
        "signal_strength": 0,
        "transferability": 0,
        "total": 0
      },
      "include_tier": "must_include|space_allows",
      "notes": "Optional: 1 short sentence on what to watch next"
    }
  ]
}

Rules:
- Do not invent facts not present in the article snippet.
- If unsure, state assumptions briefly in notes.
- Aim for 8-20 included items if available; otherwise include fewer."#;

pub const WRITER_SYSTEM_PROMPT: &str = r#"You are the editor of a prestigious industry intelligence newsletter covering the global B2B trade press, conferences, exhibitions, and events industry. Your readers are C-suite executives, board members, investors, and senior strategists.

WRITING STYLE - FT/ECONOMIST EDITORIAL STANDARDS:

TONE:
- Authoritative and analytical, never promotional
- Assume reader is a senior executive or board member
- Focus on strategic implications, not just facts
- Use measured, confident language - avoid hyperbole
- Be direct and concise - every sentence must earn its place

STRUCTURE:
- Lead with the strategic significance ("why this matters")
- Follow with the key facts
- Close with forward-looking implications
- Use short paragraphs (2-3 sentences max)

LANGUAGE:
- Prefer active voice
- Avoid jargon unless industry-standard
- No exclamation marks
- No marketing speak ("excited to announce", "thrilled", "game-changing")
- Use precise numbers and attribution
- "Sources suggest" or "according to" for unconfirmed information

ANALYSIS:
- Connect individual stories to broader market trends
- Reference comparable deals/moves where relevant
- Note what isn't being said as well as what is
- Consider competitive implications

EXAMPLES OF GOOD PHRASING:
- "The acquisition signals..." not "This is a game-changing deal"
- "The move comes amid..." not "In exciting news..."
- "Industry observers note..." not "Everyone is talking about..."
- "The appointment suggests a strategic shift toward..." not "Great hire!""#;

const WRITER_OUTPUT: &str = r#"Respond with valid JSON in this exact structure:
{
    "intro": "A 2-3 sentence editorial overview of this period's key themes and what they signal for the industry",
    "sections": {
        "market_signals": {
            "stories": [
                {
                    "shortlist_index": 1,
                    "headline": "Strategic, informative headline",
                    "summary": "2-3 paragraph analysis in FT style. Focus on strategic implications.",
                    "sub_theme": "Macro Economy",
                    "why_selected": "Brief editorial note on significance"
                }
            ]
        },
        "deals": {
            "stories": [...]
        },
        "hires_fires": {
            "stories": [...]
        }
    }
}

IMPORTANT: For market_signals stories, you MUST include "sub_theme" field with either "Macro Economy" or "Consumer Trends".
Do NOT include any "briefs" or "in brief" items - only main stories.
If a section has no relevant stories, use empty arrays.
Return ONLY valid JSON, no other text."#;

fn editorial_instructions(custom: Option<&str>) -> String {
    match custom.map(str::trim).filter(|c| !c.is_empty()) {
        Some(c) => format!("SPECIAL EDITORIAL INSTRUCTIONS: {}\n\n", c),
        None => String::new(),
    }
}

fn user_flag(article: &Article) -> &'static str {
    if article.is_user_provided() {
        USER_FLAG
    } else {
        ""
    }
}

#[derive(Debug, Clone)]
pub struct FilterRequest {
    pub articles: Vec<Article>,
    pub custom_instructions: Option<String>,
}

impl FilterRequest {
    pub fn new(articles: &[Article], custom_instructions: Option<String>) -> Self {
        Self {
            articles: articles.iter().take(MAX_ARTICLES_IN_PROMPT).cloned().collect(),
            custom_instructions,
        }
    }

    pub fn to_prompt(&self) -> String {
        let mut prompt = editorial_instructions(self.custom_instructions.as_deref());
        prompt.push_str("ARTICLES:\n");

        for (i, article) in self.articles.iter().enumerate() {
            prompt.push_str(&format!(
                "---\n[Article {}]{}\nSource: {}\nTitle: {}\nPublished: {}\nLink: {}\nContent: {}\n---\n",
                i + 1,
                user_flag(article),
                article.source,
                article.title,
                article.published,
                article.link,
                truncate_chars(&article.content, PROMPT_CONTENT_CHARS),
            ));
        }

        prompt.push('\n');
        prompt.push_str(FILTER_TASK);
        prompt
    }
}

#[derive(Debug, Clone)]
pub struct WriteRequest {
    pub shortlist: Vec<ShortlistItem>,
    pub stories_per_section: usize,
    pub custom_instructions: Option<String>,
}

impl WriteRequest {
    pub fn new(
        shortlist: &[ShortlistItem],
        stories_per_section: usize,
        custom_instructions: Option<String>,
    ) -> Self {
        Self {
            shortlist: shortlist.iter().take(MAX_SHORTLIST_IN_PROMPT).cloned().collect(),
            stories_per_section,
            custom_instructions,
        }
    }

    pub fn to_prompt(&self) -> String {
        let mut prompt = String::from(
            "YOUR TASK:\nUsing ONLY the shortlisted items, produce a newsletter with three \
             sections. For each section, select the most significant stories and write them in \
             FT/Economist editorial style.\n\nSECTIONS TO PRODUCE:\n",
        );

        for section in SECTIONS {
            prompt.push_str(&format!(
                "{}:\n- {}\n- Focus: {}\n\n",
                section.title.to_uppercase(),
                section.description,
                section.prompt_focus
            ));
        }

        prompt.push_str(&format!(
            "IMPORTANT RULES:\n\
             1. USER-PROVIDED SOURCES (marked with [USER-PROVIDED SOURCE]) should be prioritized - the editor specifically collected these\n\
             2. Each section should have {} main stories (if enough quality content exists)\n\
             3. If a story doesn't clearly fit a section, use your judgment or skip it\n\
             4. Avoid duplicating the same story across sections\n\
             5. Write headlines that are informative, not clickbait\n\
             6. Summaries should be 2-3 short paragraphs analyzing the strategic significance\n\n",
            self.stories_per_section
        ));

        prompt.push_str(&editorial_instructions(self.custom_instructions.as_deref()));
        prompt.push_str("SHORTLISTED ITEMS TO ANALYZE:\n");

        for (i, item) in self.shortlist.iter().enumerate() {
            let a = &item.article;
            prompt.push_str(&format!(
                "---\n[Shortlist {}]{}\nSource: {}\nTitle: {}\nPublished: {}\nLink: {}\n\
                 PrimaryLens: {}\nScoreTotal: {}/25\nWhyItMatters: {}\nBoardQuestion: {}\n---\n",
                i + 1,
                user_flag(a),
                a.source,
                a.title,
                a.published,
                a.link,
                item.primary_lens,
                item.total_score,
                item.why_it_matters,
                item.board_question,
            ));
        }

        prompt.push('\n');
        prompt.push_str(WRITER_OUTPUT);
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleOrigin, FilteredArticle, Scores};

    fn article(i: usize, origin: ArticleOrigin) -> Article {
        Article {
            source: "Tsnn".to_string(),
            title: format!("Story {}", i),
            link: format!("https://example.com/{}", i),
            content: "y".repeat(2000),
            published: "09 March 2025".to_string(),
            pub_timestamp: i as i64,
            origin,
        }
    }

    #[test]
    fn test_filter_prompt_caps_and_flags() {
        let mut articles = vec![article(0, ArticleOrigin::UserSource)];
        articles.extend((1..80).map(|i| article(i, ArticleOrigin::Feed)));

        let request = FilterRequest::new(&articles, Some("Focus on Asia".to_string()));
        let prompt = request.to_prompt();

        assert_eq!(request.articles.len(), MAX_ARTICLES_IN_PROMPT);
        assert!(prompt.starts_with("SPECIAL EDITORIAL INSTRUCTIONS: Focus on Asia"));
        assert!(prompt.contains("[Article 1] [USER-PROVIDED SOURCE - PRIORITIZE]"));
        assert!(prompt.contains("[Article 60]\n"));
        assert!(!prompt.contains("[Article 61]"));
        assert!(!prompt.contains(&"y".repeat(PROMPT_CONTENT_CHARS + 1)));
        assert!(prompt.contains("\"article_index\": 1"));
    }

    #[test]
    fn test_writer_prompt_lists_sections_and_shortlist() {
        let item = ShortlistItem::new(
            article(3, ArticleOrigin::Feed),
            FilteredArticle {
                article_index: Some(1),
                primary_lens: "Macro & Capital".to_string(),
                why_it_matters: "Capital is repricing.".to_string(),
                scores: Scores {
                    total: Some(22.0),
                    ..Default::default()
                },
                ..Default::default()
            },
        );

        let prompt = WriteRequest::new(&[item], 4, None).to_prompt();

        assert!(prompt.contains("MARKET SIGNALS:"));
        assert!(prompt.contains("HIRES & FIRES:"));
        assert!(prompt.contains("Each section should have 4 main stories"));
        assert!(prompt.contains("[Shortlist 1]\nSource: Tsnn"));
        assert!(prompt.contains("ScoreTotal: 22/25"));
        assert!(!prompt.contains("SPECIAL EDITORIAL INSTRUCTIONS"));
    }
}
