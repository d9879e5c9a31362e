//! Markdown conversion and the styled output container.

use pulldown_cmark::{html, Options, Parser};

/// Class carried by the output container.
pub const OUTPUT_CLASS: &str = "outline-output";

const OUTPUT_STYLE: &str = "font-family: \"Segoe UI\", sans-serif; \
    line-height: 1.6; \
    padding: 20px; \
    background-color: #ffffff; \
    border-radius: 10px; \
    border: 1px solid #ccc; \
    box-shadow: 0 2px 10px rgba(0,0,0,0.05); \
    color: #333;";

/// Converts Markdown to an HTML fragment.
///
/// Tables and strikethrough are enabled. Raw HTML in the input is passed
/// through unchanged.
#[must_use]
pub fn markdown_to_html(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(text, options);

    let mut out = String::with_capacity(text.len() + text.len() / 2);
    html::push_html(&mut out, parser);
    out
}

/// Wraps an HTML fragment in the styled output container.
///
/// A fragment that already starts with the exact styled container is returned
/// unchanged. A bare `<div class="outline-output">` is wrapped like any other
/// fragment.
#[must_use]
pub fn wrap_styled(fragment: &str) -> String {
    if fragment.trim_start().starts_with(&opening_tag()) {
        return fragment.to_string();
    }
    wrap(fragment)
}

/// Converts final stage text to the styled HTML shown in the output pane.
///
/// The result is always wrapped, whatever markup the text itself contains.
#[must_use]
pub fn format_output(text: &str) -> String {
    wrap(&markdown_to_html(text))
}

fn opening_tag() -> String {
    format!("<div class=\"{OUTPUT_CLASS}\" style='{OUTPUT_STYLE}'>")
}

fn wrap(fragment: &str) -> String {
    format!("{}\n{fragment}</div>\n", opening_tag())
}
