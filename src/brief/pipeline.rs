use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;

use crate::brief::shortlist::build_shortlist;
use crate::brief::writer::assemble_sections;
use crate::config::PipelineConfig;
use crate::dedup::Deduplicator;
use crate::error::Result;
use crate::feeds::{FeedClient, FeedSource};
use crate::llm::{FilterRequest, LLMProvider, WriteRequest};
use crate::models::{display_date, NewsletterContent};
use crate::render::{render, OutputFormat, RenderOptions};
use crate::sources::load_user_sources;

#[derive(Debug, Clone)]
pub struct BriefRequest {
    pub feeds: Vec<FeedSource>,
    pub sources_folder: Option<PathBuf>,
    pub format: OutputFormat,
    pub title: String,
    pub footer: Option<String>,
}

#[derive(Debug, Clone)]
pub enum BriefOutcome {
    /// Nothing came back from the feeds or the sources folder.
    NoArticles,
    /// The model kept none of the articles.
    EmptyShortlist,
    Rendered {
        content: NewsletterContent,
        body: String,
    },
}

impl BriefOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            BriefOutcome::NoArticles => Some("No articles found. Check RSS feeds and sources folder."),
            BriefOutcome::EmptyShortlist => {
                Some("No articles passed the board-level filter this period.")
            }
            BriefOutcome::Rendered { .. } => None,
        }
    }
}

pub struct BriefPipeline {
    feeds: FeedClient,
    llm: Arc<dyn LLMProvider>,
    config: PipelineConfig,
}

impl BriefPipeline {
    pub fn new(feeds: FeedClient, llm: impl LLMProvider + 'static, config: PipelineConfig) -> Self {
        Self {
            feeds,
            llm: Arc::new(llm),
            config,
        }
    }

    pub async fn generate(&self, request: &BriefRequest) -> Result<BriefOutcome> {
        // Step 1: Fetch feeds
        tracing::info!("[1/5] Fetching articles from {} RSS sources", request.feeds.len());
        let mut articles = self
            .feeds
            .fetch_all(&request.feeds, self.config.days_back, self.config.concurrency_limit)
            .await;

        // Step 2: User sources go first so they survive dedup
        match &request.sources_folder {
            Some(folder) => {
                tracing::info!("[2/5] Loading user-provided sources");
                let mut user_articles = load_user_sources(folder, Utc::now());
                user_articles.append(&mut articles);
                articles = user_articles;
            }
            None => tracing::info!("[2/5] No user sources folder specified, skipping"),
        }

        let articles = Deduplicator::new().dedup(articles);
        tracing::info!("Total articles to analyze: {}", articles.len());

        if articles.is_empty() {
            return Ok(BriefOutcome::NoArticles);
        }

        // Step 3: Filter + score
        tracing::info!("[3/5] Filtering and scoring articles with {}", self.llm.name());
        let filter_request =
            FilterRequest::new(&articles, self.config.custom_instructions.clone());
        let prompted = filter_request.articles.len();
        let filtered = self.llm.filter_articles(filter_request).await?;
        let shortlist = build_shortlist(&articles, prompted, filtered);
        tracing::info!("Shortlisted {} articles", shortlist.len());

        if shortlist.is_empty() {
            return Ok(BriefOutcome::EmptyShortlist);
        }

        // Step 4: Write sections from the shortlist
        tracing::info!("[4/5] Writing newsletter with {} from shortlist", self.llm.name());
        let write_request = WriteRequest::new(
            &shortlist,
            self.config.stories_per_section,
            self.config.custom_instructions.clone(),
        );
        let prompted = write_request.shortlist.len();
        let draft = self.llm.write_newsletter(write_request).await?;
        let content = assemble_sections(&shortlist, prompted, draft, self.config.stories_per_section);
        tracing::info!("Generated {} main stories", content.total_stories());

        // Step 5: Render
        tracing::info!("[5/5] Rendering {} newsletter", request.format);
        let options = RenderOptions {
            title: request.title.clone(),
            date: display_date(Utc::now()),
            footer: request.footer.clone(),
        };
        let body = render(&content, request.format, &options)?;
        tracing::info!("Newsletter complete ({} characters)", body.chars().count());

        Ok(BriefOutcome::Rendered { content, body })
    }
}
