pub mod html;
pub mod markdown;

use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::NewsletterContent;

pub const DEFAULT_FOOTER: &str = "Published by Second Curves";
pub const TAGLINE: &str = "Intelligence for the global exhibitions, events & trade media industry";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::Config(format!("unknown output format: {}", other))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "HTML"),
            OutputFormat::Markdown => write!(f, "Markdown"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title: String,
    pub date: String,
    pub footer: Option<String>,
}

impl RenderOptions {
    pub fn footer_text(&self) -> &str {
        self.footer
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(DEFAULT_FOOTER)
    }
}

#[derive(Serialize)]
struct JsonBrief<'a> {
    title: &'a str,
    date: &'a str,
    footer: &'a str,
    #[serde(flatten)]
    content: &'a NewsletterContent,
}

pub fn render(
    content: &NewsletterContent,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String> {
    match format {
        OutputFormat::Html => Ok(html::render_html(content, options)),
        OutputFormat::Markdown => Ok(markdown::render_markdown(content, options)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&JsonBrief {
            title: &options.title,
            date: &options.date,
            footer: options.footer_text(),
            content,
        })?),
    }
}

/// The empty-section line shared by the HTML and Markdown layouts.
pub(crate) fn empty_section_text(title: &str) -> String {
    format!("No significant {} this period.", title.to_lowercase())
}
