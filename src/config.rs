use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub model: String,
    pub extra_prompt: Option<String>,
    pub feed_concurrency: usize,
    pub feed_timeout_secs: u64,
}

impl Config {
    /// Reads settings from the environment. `api_key_override` (from the CLI)
    /// wins over `ANTHROPIC_API_KEY`.
    pub fn from_env(api_key_override: Option<String>) -> Result<Self> {
        let anthropic_api_key = match api_key_override.filter(|k| !k.trim().is_empty()) {
            Some(key) => key,
            None => env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| {
                    Error::Config(
                        "ANTHROPIC_API_KEY not set (use --api-key or the environment)".to_string(),
                    )
                })?,
        };

        let model = env::var("ANTHROPIC_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let extra_prompt = env::var("EXTRA_PROMPT")
            .ok()
            .filter(|p| !p.trim().is_empty());

        let feed_concurrency: usize = positive_setting(env::var("FEED_CONCURRENCY").ok()).unwrap_or(5);
        let feed_timeout_secs: u64 = positive_setting(env::var("FEED_TIMEOUT_SECS").ok()).unwrap_or(15);

        Ok(Self {
            anthropic_api_key,
            model,
            extra_prompt,
            feed_concurrency,
            feed_timeout_secs,
        })
    }
}

/// A numeric setting that must be above zero; anything else is ignored.
fn positive_setting<T>(raw: Option<String>) -> Option<T>
where
    T: FromStr + PartialOrd + Default,
{
    raw.and_then(|v| v.trim().parse().ok())
        .filter(|n: &T| *n > T::default())
}

/// Per-run knobs for [`crate::BriefPipeline`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub days_back: i64,
    pub stories_per_section: usize,
    pub custom_instructions: Option<String>,
    pub concurrency_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            days_back: 7,
            stories_per_section: 3,
            custom_instructions: None,
            concurrency_limit: 5,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            custom_instructions: config.extra_prompt.clone(),
            concurrency_limit: config.feed_concurrency,
            ..Default::default()
        }
    }
}
