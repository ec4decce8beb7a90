use async_trait::async_trait;
use crate::error::Result;
use crate::llm::prompts::{FilterRequest, WriteRequest};
use crate::models::{FilterResponse, WriterResponse};

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Stage 1: keep and score the board-relevant articles.
    async fn filter_articles(&self, request: FilterRequest) -> Result<FilterResponse>;
    /// Stage 2: draft the sectioned newsletter from the shortlist.
    async fn write_newsletter(&self, request: WriteRequest) -> Result<WriterResponse>;
    fn name(&self) -> &str;
}
