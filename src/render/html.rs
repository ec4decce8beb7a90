use crate::models::{NewsletterContent, Section, Story};
use crate::render::{empty_section_text, RenderOptions, TAGLINE};

const STYLE: &str = r#"        * { box-sizing: border-box; }
        body {
            font-family: 'Georgia', 'Times New Roman', serif;
            max-width: 700px;
            margin: 0 auto;
            padding: 20px;
            background: #FFF9F5;
            color: #1a1a1a;
            line-height: 1.7;
            font-size: 17px;
        }
        .header { border-bottom: 3px double #1a1a1a; padding-bottom: 20px; margin-bottom: 30px; text-align: center; }
        .header h1 { font-size: 32px; font-weight: 700; margin: 0 0 5px 0; letter-spacing: -0.5px; }
        .header .tagline { font-style: italic; color: #666; font-size: 14px; margin-bottom: 10px; }
        .header .date { font-size: 13px; color: #888; text-transform: uppercase; letter-spacing: 1px; }
        .intro { font-size: 18px; font-style: italic; color: #444; border-left: 3px solid #c41e3a; padding-left: 20px; margin: 30px 0; }
        .section { margin-bottom: 40px; }
        .section-header { display: flex; align-items: center; border-bottom: 1px solid #ccc; padding-bottom: 10px; margin-bottom: 20px; }
        .section-header h2 { font-size: 22px; font-weight: 700; margin: 0; color: #1a1a1a; }
        .section-header .icon { font-size: 20px; margin-right: 10px; }
        .sub-theme {
            font-size: 16px;
            font-weight: 700;
            color: #c41e3a;
            text-transform: uppercase;
            letter-spacing: 1px;
            margin: 25px 0 15px 0;
            padding-bottom: 5px;
            border-bottom: 1px dotted #c41e3a;
        }
        .story { margin-bottom: 25px; padding-bottom: 25px; border-bottom: 1px dotted #ddd; }
        .story:last-child { border-bottom: none; }
        .story h3 { font-size: 19px; font-weight: 700; margin: 0 0 10px 0; line-height: 1.3; }
        .story .meta { font-size: 12px; color: #888; margin-bottom: 10px; text-transform: uppercase; letter-spacing: 0.5px; }
        .story .content { color: #333; }
        .story .content p { margin: 0 0 12px 0; }
        .story .source-link { font-size: 13px; color: #c41e3a; text-decoration: none; }
        .story .source-link:hover { text-decoration: underline; }
        .footer { margin-top: 40px; padding-top: 20px; border-top: 1px solid #ccc; text-align: center; font-size: 12px; color: #888; }
        .no-stories { color: #888; font-style: italic; }
"#;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_html(content: &NewsletterContent, options: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("    <meta charset=\"utf-8\">\n");
    out.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(&format!("    <title>{}</title>\n", escape(&options.title)));
    out.push_str("    <style>\n");
    out.push_str(STYLE);
    out.push_str("    </style>\n</head>\n<body>\n");

    out.push_str("    <div class=\"header\">\n");
    out.push_str(&format!("        <h1>{}</h1>\n", escape(&options.title)));
    out.push_str(&format!("        <div class=\"tagline\">{}</div>\n", escape(TAGLINE)));
    out.push_str(&format!("        <div class=\"date\">{}</div>\n", escape(&options.date)));
    out.push_str("    </div>\n\n");

    if !content.intro.is_empty() {
        out.push_str(&format!(
            "    <div class=\"intro\">\n        {}\n    </div>\n\n",
            escape(&content.intro)
        ));
    }

    for section in &content.sections {
        push_section(&mut out, section);
    }

    out.push_str(&format!(
        "    <div class=\"footer\">\n        {}\n    </div>\n</body>\n</html>\n",
        escape(options.footer_text())
    ));

    out
}

fn push_section(out: &mut String, section: &Section) {
    out.push_str("    <div class=\"section\">\n");
    out.push_str("        <div class=\"section-header\">\n");
    out.push_str(&format!("            <span class=\"icon\">{}</span>\n", escape(&section.icon)));
    out.push_str(&format!("            <h2>{}</h2>\n", escape(&section.title)));
    out.push_str("        </div>\n");

    if section.stories.is_empty() {
        out.push_str(&format!(
            "        <p class=\"no-stories\">{}</p>\n",
            escape(&empty_section_text(&section.title))
        ));
    } else if let Some(sub_themes) = &section.sub_themes {
        for sub_theme in sub_themes {
            out.push_str(&format!("        <div class=\"sub-theme\">{}</div>\n", escape(sub_theme)));
            for story in section.stories_in(sub_theme) {
                push_story(out, story);
            }
        }
    } else {
        for story in &section.stories {
            push_story(out, story);
        }
    }

    out.push_str("    </div>\n\n");
}

fn push_story(out: &mut String, story: &Story) {
    out.push_str("        <div class=\"story\">\n");
    out.push_str(&format!("            <h3>{}</h3>\n", escape(&story.headline)));
    out.push_str(&format!(
        "            <div class=\"meta\">{} &bull; {}</div>\n",
        escape(&story.source),
        escape(&story.published)
    ));
    out.push_str("            <div class=\"content\">\n");
    for paragraph in paragraphs(&story.summary) {
        out.push_str(&format!("                <p>{}</p>\n", escape(&paragraph)));
    }
    out.push_str("            </div>\n");
    if !story.link.is_empty() {
        out.push_str(&format!(
            "            <a href=\"{}\" class=\"source-link\">Read source &rarr;</a>\n",
            escape(&story.link)
        ));
    }
    out.push_str("        </div>\n");
}

/// Blank-line separated blocks, each folded onto one line.
fn paragraphs(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(headline: &str, sub_theme: Option<&str>, link: &str) -> Story {
        Story {
            headline: headline.to_string(),
            summary: "First <para>.\n\nSecond\npara.".to_string(),
            source: "Press Gazette".to_string(),
            link: link.to_string(),
            published: "09 March 2025".to_string(),
            sub_theme: sub_theme.map(String::from),
        }
    }

    fn options() -> RenderOptions {
        RenderOptions {
            title: "Media & Events Brief".to_string(),
            date: "10 March 2025".to_string(),
            footer: None,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">Tom's & co</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom&#39;s &amp; co&lt;/a&gt;");
    }

    #[test]
    fn test_render_html_layout() {
        let content = NewsletterContent {
            intro: "Capital is moving.".to_string(),
            sections: vec![
                Section {
                    key: "market_signals".to_string(),
                    title: "Market Signals".to_string(),
                    icon: "📊".to_string(),
                    stories: vec![
                        story("Consumers return", Some("Consumer Trends"), ""),
                        story("Rates bite", Some("Macro Economy"), "https://example.com/rates"),
                    ],
                    sub_themes: Some(vec!["Macro Economy".to_string(), "Consumer Trends".to_string()]),
                },
                Section {
                    key: "hires_fires".to_string(),
                    title: "Hires & Fires".to_string(),
                    icon: "👔".to_string(),
                    stories: Vec::new(),
                    sub_themes: None,
                },
            ],
        };

        let html = render_html(&content, &options());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Media &amp; Events Brief</title>"));
        assert!(html.contains("<div class=\"date\">10 March 2025</div>"));
        assert!(html.contains("Capital is moving."));

        let macro_pos = html.find("<div class=\"sub-theme\">Macro Economy</div>").unwrap();
        let consumer_pos = html.find("<div class=\"sub-theme\">Consumer Trends</div>").unwrap();
        let rates_pos = html.find("<h3>Rates bite</h3>").unwrap();
        let returns_pos = html.find("<h3>Consumers return</h3>").unwrap();
        assert!(macro_pos < rates_pos && rates_pos < consumer_pos && consumer_pos < returns_pos);

        assert!(html.contains("<p>First &lt;para&gt;.</p>"));
        assert!(html.contains("<p>Second para.</p>"));
        assert_eq!(html.matches("class=\"source-link\"").count(), 1);
        assert!(html.contains("No significant hires &amp; fires this period."));
        assert!(html.contains("Published by Second Curves"));
    }

    #[test]
    fn test_render_html_omits_empty_intro() {
        let html = render_html(&NewsletterContent::default(), &options());
        assert!(!html.contains("<div class=\"intro\">"));
    }
}
