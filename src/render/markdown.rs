use crate::models::{NewsletterContent, Story};
use crate::render::{empty_section_text, RenderOptions, TAGLINE};

pub fn render_markdown(content: &NewsletterContent, options: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", options.title));
    out.push_str(&format!("*{}*\n\n", TAGLINE));
    out.push_str(&format!("**{}**\n\n---\n\n", options.date));

    if !content.intro.is_empty() {
        for line in content.intro.lines() {
            if line.trim().is_empty() {
                out.push_str(">\n");
            } else {
                out.push_str(&format!("> {}\n", line));
            }
        }
        out.push_str("\n---\n\n");
    }

    for section in &content.sections {
        out.push_str(&format!("## {} {}\n\n", section.icon, section.title));

        if section.stories.is_empty() {
            out.push_str(&format!("*{}*\n\n", empty_section_text(&section.title)));
            continue;
        }

        match &section.sub_themes {
            Some(sub_themes) => {
                for sub_theme in sub_themes {
                    out.push_str(&format!("### {}\n\n", sub_theme));
                    for story in section.stories_in(sub_theme) {
                        push_story(&mut out, story, "####");
                    }
                }
            }
            None => {
                for story in &section.stories {
                    push_story(&mut out, story, "###");
                }
            }
        }
    }

    out.push_str(&format!("---\n\n*{}*\n", options.footer_text()));
    out
}

fn push_story(out: &mut String, story: &Story, heading: &str) {
    out.push_str(&format!("{} {}\n\n", heading, story.headline));
    out.push_str(&format!("*{} • {}*\n\n", story.source, story.published));
    if !story.summary.is_empty() {
        out.push_str(story.summary.trim());
        out.push_str("\n\n");
    }
    if !story.link.is_empty() {
        out.push_str(&format!("[Read source →]({})\n\n", story.link));
    }
    out.push_str("---\n\n");
}
