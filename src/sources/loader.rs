use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;

use crate::error::Result;
use crate::models::{url_title, Article};
use crate::text::{humanize_name, truncate_chars};

pub const MAX_USER_CONTENT_CHARS: usize = 3000;
const USER_SOURCE: &str = "User Source";

static RE_MD_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("valid regex"));

type Loader = fn(&Path, DateTime<Utc>) -> Result<Vec<Article>>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SourceRecord {
    source: Option<String>,
    title: Option<String>,
    link: Option<String>,
    url: Option<String>,
    content: Option<String>,
    summary: Option<String>,
    text: Option<String>,
    published: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SourceFile {
    Many(Vec<SourceRecord>),
    One(SourceRecord),
}

/// Loads editor-collected material from `folder`: `.txt` (URL lists or
/// plain text), `.json` (one record or an array) and `.md` files.
/// Unreadable files are skipped with a warning.
pub fn load_user_sources(folder: &Path, now: DateTime<Utc>) -> Vec<Article> {
    if !folder.is_dir() {
        tracing::warn!("Sources folder not found: {}", folder.display());
        return Vec::new();
    }

    tracing::info!("Loading user sources from {}", folder.display());

    let mut articles = Vec::new();

    let loaders: [(&str, Loader); 3] = [("txt", load_txt), ("json", load_json), ("md", load_md)];

    for (ext, loader) in loaders {
        let files = match files_with_extension(folder, ext) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!("Cannot list {}: {}", folder.display(), e);
                return articles;
            }
        };

        for path in files {
            match loader(&path, now) {
                Ok(loaded) => articles.extend(loaded),
                Err(e) => tracing::warn!("Error reading {}: {}", path.display(), e),
            }
        }
    }

    tracing::info!("Loaded {} user-provided sources", articles.len());
    articles
}

fn files_with_extension(folder: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(folder)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some(ext))
        .collect();
    files.sort();
    Ok(files)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

fn is_url(line: &str) -> bool {
    line.starts_with("http://") || line.starts_with("https://")
}

fn load_txt(path: &Path, now: DateTime<Utc>) -> Result<Vec<Article>> {
    let content = std::fs::read_to_string(path)?;
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        tracing::debug!("Skipping blank source file {}", path.display());
        return Ok(Vec::new());
    }

    if lines.iter().all(|l| is_url(l)) {
        return Ok(lines
            .into_iter()
            .map(|url| {
                Article::user_source(
                    USER_SOURCE,
                    url_title(url),
                    url,
                    format!("[User-provided URL: {}]", url),
                    now,
                )
            })
            .collect());
    }

    Ok(vec![Article::user_source(
        USER_SOURCE,
        humanize_name(&file_stem(path)),
        "",
        truncate_chars(&content, MAX_USER_CONTENT_CHARS),
        now,
    )])
}

fn load_json(path: &Path, now: DateTime<Utc>) -> Result<Vec<Article>> {
    let raw = std::fs::read_to_string(path)?;
    let records = match serde_json::from_str::<SourceFile>(&raw)? {
        SourceFile::Many(records) => records,
        SourceFile::One(record) => vec![record],
    };

    Ok(records
        .into_iter()
        .map(|record| record_to_article(record, now))
        .collect())
}

fn record_to_article(record: SourceRecord, now: DateTime<Utc>) -> Article {
    let content = record
        .content
        .or(record.summary)
        .or(record.text)
        .unwrap_or_default();

    let mut article = Article::user_source(
        record.source.unwrap_or_else(|| USER_SOURCE.to_string()),
        record.title.unwrap_or_else(|| "Untitled".to_string()),
        record.link.or(record.url).unwrap_or_default(),
        truncate_chars(&content, MAX_USER_CONTENT_CHARS),
        now,
    );
    if let Some(published) = record.published.filter(|p| !p.trim().is_empty()) {
        article.published = published;
    }
    article
}

fn load_md(path: &Path, now: DateTime<Utc>) -> Result<Vec<Article>> {
    let content = std::fs::read_to_string(path)?;
    let title = RE_MD_HEADING
        .captures(&content)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| humanize_name(&file_stem(path)));

    Ok(vec![Article::user_source(
        USER_SOURCE,
        title,
        "",
        truncate_chars(&content, MAX_USER_CONTENT_CHARS),
        now,
    )])
}
