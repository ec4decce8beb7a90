pub mod config;
pub mod error;
pub mod models;
pub mod text;
pub mod feeds;
pub mod sources;
pub mod dedup;
pub mod llm;
pub mod brief;
pub mod render;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use feeds::{FeedClient, FeedSource};
pub use llm::{ClaudeProvider, LLMProvider};
pub use brief::{BriefOutcome, BriefPipeline, BriefRequest};
pub use render::OutputFormat;
