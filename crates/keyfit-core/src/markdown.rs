//! Markdown to prose conversion.
//!
//! Copy is often drafted in markdown. Analysis runs on the visible prose, so
//! formatting is parsed away with pulldown-cmark.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Strip markdown formatting, returning the visible copy as plain prose.
///
/// Removed: YAML frontmatter, code blocks, inline code, HTML, and tables.
///
/// Kept: paragraph, list and blockquote text, link text, emphasis text
/// (without markers), image alt text, and headings. A heading becomes its
/// own sentence so that it does not run into the following paragraph.
///
/// Whitespace in the result is collapsed to single spaces.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let body = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let mut prose = String::with_capacity(body.len());
    let mut skip_depth: usize = 0;

    for event in Parser::new_ext(body, options) {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Table(_)) => skip_depth += 1,
            Event::End(TagEnd::CodeBlock | TagEnd::Table) => {
                skip_depth = skip_depth.saturating_sub(1);
            }
            _ if skip_depth > 0 => {}

            Event::Text(t) => prose.push_str(&t),
            Event::SoftBreak | Event::HardBreak => prose.push(' '),
            Event::End(TagEnd::Heading(_)) => {
                let trimmed = prose.trim_end().len();
                prose.truncate(trimmed);
                if !prose.is_empty() && !prose.ends_with(['.', '!', '?', ':']) {
                    prose.push('.');
                }
                prose.push(' ');
            }
            Event::End(TagEnd::Paragraph | TagEnd::Item | TagEnd::BlockQuote(_)) => {
                prose.push(' ');
            }
            _ => {}
        }
    }

    prose.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop leading YAML frontmatter delimited by `---` lines.
///
/// Text without a closed frontmatter block is returned unchanged.
pub fn strip_frontmatter(text: &str) -> &str {
    let Some(body) = text.trim_start().strip_prefix("---") else {
        return text;
    };
    let Some(close) = body.find("\n---") else {
        return text;
    };
    body[close + "\n---".len()..]
        .split_once('\n')
        .map_or("", |(_, rest)| rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_removed() {
        let input = "Shop now.\n\n```html\n<div class=\"bra\"></div>\n```\n\nUse `promo10` at checkout.";
        let result = strip_to_prose(input);
        assert_eq!(result, "Shop now. Use at checkout.");
    }

    #[test]
    fn frontmatter_is_removed() {
        let input = "---\ntitle: Spring launch\nslug: wireless-bras\n---\n\nMeet the new range.";
        assert_eq!(strip_to_prose(input), "Meet the new range.");
    }

    #[test]
    fn unclosed_frontmatter_is_left_alone() {
        let input = "---\ntitle: draft";
        assert_eq!(strip_frontmatter(input), input);
    }

    #[test]
    fn headings_become_sentences() {
        let input = "# Wireless Bras\n\nAll-day comfort.\n\n## Why us?\n\nFree returns.";
        assert_eq!(
            strip_to_prose(input),
            "Wireless Bras. All-day comfort. Why us? Free returns."
        );
    }

    #[test]
    fn link_and_alt_text_are_kept() {
        let input = "See [our sizing guide](https://example.com/size) ![lace bralette](b.png)";
        let result = strip_to_prose(input);
        assert!(result.contains("our sizing guide"));
        assert!(result.contains("lace bralette"));
        assert!(!result.contains("example.com"));
        assert!(!result.contains("b.png"));
    }

    #[test]
    fn emphasis_markers_are_removed() {
        let result = strip_to_prose("Now **half price** on *all* styles.");
        assert_eq!(result, "Now half price on all styles.");
    }

    #[test]
    fn tables_are_removed() {
        let input = "Sizes below.\n\n| Band | Cup |\n|---|---|\n| 34 | B |\n\nOrder today.";
        assert_eq!(strip_to_prose(input), "Sizes below. Order today.");
    }

    #[test]
    fn list_items_are_separated() {
        let input = "- Soft cups\n- No wires\n\n> Best bra I own.";
        assert_eq!(strip_to_prose(input), "Soft cups No wires Best bra I own.");
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(strip_to_prose("").is_empty());
        assert!(strip_to_prose("```\ncode only\n```").is_empty());
    }
}
