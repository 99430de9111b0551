//! Text rendering for concept descriptions.
//!
//! The renderer is chosen once, when a controller is built: markdown when the
//! `markdown` feature is compiled in and enabled, otherwise escaped plain text.

pub mod html;
pub mod timestamp;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRenderer {
    Markdown,
    Plain,
}

impl TextRenderer {
    pub fn markdown_available() -> bool {
        cfg!(feature = "markdown")
    }

    pub fn detect(prefer_markdown: bool) -> Self {
        if prefer_markdown && Self::markdown_available() {
            TextRenderer::Markdown
        } else {
            if prefer_markdown {
                tracing::warn!("markdown support not compiled in; using plain-text rendering");
            }
            TextRenderer::Plain
        }
    }

    pub fn render(&self, text: &str) -> String {
        match self {
            TextRenderer::Markdown => markdown_to_html(text),
            TextRenderer::Plain => plain_to_html(text),
        }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::detect(true)
    }
}

#[cfg(feature = "markdown")]
fn markdown_to_html(text: &str) -> String {
    use pulldown_cmark::{Options, Parser};

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(text, options);

    let mut out = String::with_capacity(text.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut out, parser);
    out
}

#[cfg(not(feature = "markdown"))]
fn markdown_to_html(text: &str) -> String {
    plain_to_html(text)
}

fn plain_to_html(text: &str) -> String {
    format!(
        r#"<div class="whitespace-pre-wrap">{}</div>"#,
        html::escape(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "markdown")]
    #[test]
    fn test_markdown_heading_and_paragraph() {
        let html = TextRenderer::Markdown.render("# City\nFloats.");
        assert_eq!(html, "<h1>City</h1>\n<p>Floats.</p>\n");
    }

    #[test]
    fn test_plain_escapes() {
        let html = TextRenderer::Plain.render("<b>bold</b> & \"quoted\"\nnext");
        assert_eq!(
            html,
            "<div class=\"whitespace-pre-wrap\">&lt;b&gt;bold&lt;/b&gt; &amp; &quot;quoted&quot;\nnext</div>"
        );
    }

    #[test]
    fn test_detect_respects_preference() {
        assert_eq!(TextRenderer::detect(false), TextRenderer::Plain);
        let preferred = TextRenderer::detect(true);
        if TextRenderer::markdown_available() {
            assert_eq!(preferred, TextRenderer::Markdown);
        } else {
            assert_eq!(preferred, TextRenderer::Plain);
        }
    }
}
