use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tradebrief::feeds::{default_feeds, load_feed_file};
use tradebrief::{
    BriefOutcome, BriefPipeline, BriefRequest, ClaudeProvider, Config, FeedClient, OutputFormat,
    PipelineConfig,
};

#[derive(Parser, Debug)]
#[command(name = "tradebrief")]
#[command(version = "0.1.0")]
#[command(about = "Generate a B2B trade press & events industry newsletter")]
#[command(after_help = "\
Sources folder:
  .txt files with URLs (one per line) or article text
  .json files with article data: {\"title\": \"...\", \"content\": \"...\", \"source\": \"...\"}
  .md files with content

Environment:
  ANTHROPIC_API_KEY   Anthropic API key (required unless --api-key)
  ANTHROPIC_MODEL     Model override
  EXTRA_PROMPT        Extra editorial instructions
  FEED_CONCURRENCY    Parallel feed fetches (default 5)
  FEED_TIMEOUT_SECS   Per-feed timeout (default 15)")]
struct Args {
    /// Output format (html, markdown, md, json)
    #[arg(short, long, default_value = "html", value_parser = ["html", "markdown", "md", "json"])]
    output: String,

    /// How many days back to look for articles
    #[arg(short, long, default_value = "7", value_parser = clap::value_parser!(u32).range(1..))]
    days: u32,

    /// Number of main stories per section
    #[arg(short, long, default_value = "3", value_parser = clap::value_parser!(u32).range(1..))]
    stories: u32,

    /// Newsletter title
    #[arg(short, long, default_value = "The Second Curves Media & Events Brief")]
    title: String,

    /// Folder containing your collected sources
    #[arg(long)]
    sources_folder: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short = 'f', long)]
    out_file: Option<PathBuf>,

    /// Anthropic API key (or set ANTHROPIC_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Footer text for the newsletter
    #[arg(long, default_value = "Published by Events Industry Intelligence")]
    footer: String,

    /// JSON file of {"name": "url"} feeds replacing the built-in list
    #[arg(long)]
    feeds: Option<PathBuf>,

    /// Extra editorial instructions (overrides EXTRA_PROMPT)
    #[arg(long)]
    instructions: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the brief
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("tradebrief=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let format: OutputFormat = args.output.parse()?;

    let config = Config::from_env(args.api_key.clone())?;

    let feeds = match &args.feeds {
        Some(path) => load_feed_file(path)?,
        None => default_feeds(),
    };

    let pipeline_config = PipelineConfig {
        days_back: i64::from(args.days),
        stories_per_section: args.stories as usize,
        custom_instructions: args
            .instructions
            .clone()
            .or_else(|| config.extra_prompt.clone()),
        ..PipelineConfig::from(&config)
    };

    let feed_client = FeedClient::new(config.feed_timeout_secs)?;
    let llm = ClaudeProvider::new(config.anthropic_api_key.clone(), Some(config.model.clone()))?;
    let pipeline = BriefPipeline::new(feed_client, llm, pipeline_config);

    let request = BriefRequest {
        feeds,
        sources_folder: args.sources_folder.clone(),
        format,
        title: args.title.clone(),
        footer: Some(args.footer.clone()),
    };

    match pipeline.generate(&request).await? {
        BriefOutcome::Rendered { body, .. } => write_output(&body, args.out_file.as_ref())?,
        outcome => {
            if let Some(message) = outcome.message() {
                write_output(message, args.out_file.as_ref())?;
            }
        }
    }

    Ok(())
}

fn write_output(output: &str, path: Option<&PathBuf>) -> anyhow::Result<()> {
    if let Some(path) = path {
        std::fs::write(path, output)?;
        tracing::info!("Saved to: {}", path.display());
    } else {
        println!("{}", output);
    }

    Ok(())
}
