use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MODEL;
use crate::error::{Error, Result};
use crate::llm::parser::{parse_filter_response, parse_writer_response};
use crate::llm::prompts::{FilterRequest, WriteRequest, FILTER_SYSTEM_PROMPT, WRITER_SYSTEM_PROMPT};
use crate::llm::provider::LLMProvider;
use crate::models::{FilterResponse, WriterResponse};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const FILTER_MAX_TOKENS: u32 = 4500;
const WRITER_MAX_TOKENS: u32 = 6000;

pub struct ClaudeProvider {
    client: Client,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ClaudeMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

#[derive(Serialize)]
struct ClaudeMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    error: Option<ClaudeError>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Deserialize)]
struct ClaudeError {
    message: String,
}

impl ClaudeProvider {
    pub fn new(api_key: String, model: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    async fn complete(&self, system: &str, prompt: &str, max_tokens: u32) -> Result<String> {
        tracing::debug!("Sending ~{} tokens to Claude", (system.len() + prompt.len()) / 4);

        let request_body = ClaudeRequest {
            model: &self.model,
            max_tokens,
            system: Some(system),
            messages: vec![ClaudeMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::LLMApi(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::LLMApi(format!(
                "Claude API error ({}): {}",
                status, body
            )));
        }

        let result: ClaudeResponse = response
            .json()
            .await
            .map_err(|e| Error::LLMApi(format!("Failed to parse Claude response: {}", e)))?;

        if let Some(error) = result.error {
            return Err(Error::LLMApi(error.message));
        }

        let text = result
            .content
            .into_iter()
            .filter(|c| c.content_type == "text")
            .filter_map(|c| c.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(Error::LLMApi("Empty response from Claude".to_string()));
        }

        Ok(text)
    }
}

#[async_trait]
impl LLMProvider for ClaudeProvider {
    async fn filter_articles(&self, request: FilterRequest) -> Result<FilterResponse> {
        let text = self
            .complete(FILTER_SYSTEM_PROMPT, &request.to_prompt(), FILTER_MAX_TOKENS)
            .await?;
        parse_filter_response(&text)
    }

    async fn write_newsletter(&self, request: WriteRequest) -> Result<WriterResponse> {
        let text = self
            .complete(WRITER_SYSTEM_PROMPT, &request.to_prompt(), WRITER_MAX_TOKENS)
            .await?;
        parse_writer_response(&text)
    }

    fn name(&self) -> &str {
        "Claude"
    }
}
