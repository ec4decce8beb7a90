use std::sync::LazyLock;

use regex::Regex;

static RE_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Wide enough that html2text never wraps inside a feed summary.
const PLAIN_TEXT_WIDTH: usize = 10_000;

/// Feed summaries arrive as HTML fragments; reduce them to a single line of
/// plain text with every entity decoded.
pub fn clean_feed_text(raw: &str) -> String {
    let plain = html2text::config::plain_no_decorate()
        .string_from_read(raw.as_bytes(), PLAIN_TEXT_WIDTH)
        .unwrap_or_else(|e| {
            tracing::debug!("html2text failed, keeping raw text: {}", e);
            raw.to_string()
        });
    collapse_whitespace(&plain)
}

pub fn collapse_whitespace(text: &str) -> String {
    RE_WS.replace_all(text, " ").trim().to_string()
}

/// Cuts to at most `max_chars` characters without splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// `"exhibition_world"` -> `"Exhibition World"`. Each alphabetic run starts
/// upper-case and continues lower-case.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Display name for a feed catalog key. Only `_` separates words; hyphens
/// are part of the name.
pub fn feed_display_name(key: &str) -> String {
    title_case(&key.replace('_', " "))
}

/// Readable label for a source file stem, where `_` and `-` both separate
/// words.
pub fn humanize_name(stem: &str) -> String {
    title_case(&stem.replace(['_', '-'], " "))
}
