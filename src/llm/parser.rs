use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::models::{FilterResponse, WriterResponse};

pub fn parse_filter_response(response: &str) -> Result<FilterResponse> {
    parse_json(response, "filter")
}

pub fn parse_writer_response(response: &str) -> Result<WriterResponse> {
    parse_json(response, "writer")
}

fn parse_json<T: DeserializeOwned>(response: &str, stage: &str) -> Result<T> {
    let json_str = extract_json(response)?;

    serde_json::from_str(&json_str).map_err(|e| {
        let preview: String = response.chars().take(500).collect();
        tracing::warn!("Unparseable {} response, preview: {}", stage, preview);
        Error::ParseError(format!("Failed to parse {} response: {}", stage, e))
    })
}

fn extract_json(text: &str) -> Result<String> {
    // Try to find JSON block in markdown code blocks
    if let Some(start) = text.find("```json") {
        let start = start + 7;
        if let Some(end) = text[start..].find("```") {
            return Ok(text[start..start + end].trim().to_string());
        }
    }

    // Try plain code block
    if let Some(start) = text.find("```") {
        let start = start + 3;
        // Skip any language identifier on the same line
        let start = text[start..]
            .find('\n')
            .map(|i| start + i + 1)
            .unwrap_or(start);
        if let Some(end) = text[start..].find("```") {
            let content = text[start..start + end].trim();
            if content.starts_with('{') {
                return Ok(content.to_string());
            }
        }
    }

    // Raw object: scan to the matching close brace
    if let Some(start) = text.find('{') {
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escape_next = false;

        for (i, c) in text[start..].char_indices() {
            if escape_next {
                escape_next = false;
                continue;
            }

            match c {
                '\\' if in_string => escape_next = true,
                '"' => in_string = !in_string,
                '{' if !in_string => depth += 1,
                '}' if !in_string => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(text[start..start + i + 1].to_string());
                    }
                }
                _ => {}
            }
        }
    }

    Err(Error::ParseError("No valid JSON found in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_markdown() {
        let input = r#"Here's the shortlist:
```json
{"included": []}
```
"#;
        let result = extract_json(input).unwrap();
        assert_eq!(result, r#"{"included": []}"#);
    }

    #[test]
    fn test_extract_raw_json_with_trailing_prose() {
        let input = r#"Result: {"intro": "Café \"deals\" {up}", "sections": {}} Hope this helps {x}"#;
        let result = extract_json(input).unwrap();
        assert_eq!(result, r#"{"intro": "Café \"deals\" {up}", "sections": {}}"#);
    }

    #[test]
    fn test_extract_json_multibyte_prefix() {
        let input = "Voilà — résumé: {\"included\": []}";
        assert_eq!(extract_json(input).unwrap(), "{\"included\": []}");
    }

    #[test]
    fn test_unbalanced_json_is_an_error() {
        assert!(matches!(
            extract_json("{\"included\": ["),
            Err(Error::ParseError(_))
        ));
        assert!(matches!(extract_json("no json here"), Err(Error::ParseError(_))));
    }

    #[test]
    fn test_parse_filter_response() {
        let text = r#"{"included": [{"article_index": 2, "primary_lens": "Macro & Capital",
            "scores": {"total": 21}, "include_tier": "must_include"}]}"#;
        let parsed = parse_filter_response(text).unwrap();
        assert_eq!(parsed.included.len(), 1);
        assert_eq!(parsed.included[0].article_index, Some(2));
    }

    #[test]
    fn test_parse_writer_response_with_missing_sections() {
        let parsed = parse_writer_response(r#"{"intro": "Quiet week."}"#).unwrap();
        assert_eq!(parsed.intro, "Quiet week.");
        assert!(parsed.sections.is_empty());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(matches!(
            parse_filter_response(r#"{"included": "none"}"#),
            Err(Error::ParseError(_))
        ));
    }
}
