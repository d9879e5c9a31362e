//! The single-form outline page.

use html_escape::encode_text;

/// Title shown in the browser tab and the page header.
pub const PAGE_TITLE: &str = "Fantasy Novel Outline Generator";

const SUBTITLE: &str = "Transform your creative vision into a fully-developed fantasy world";
const IDEA_LABEL: &str = "Enter Your Fantasy Novel Idea";
const IDEA_PLACEHOLDER: &str = "A hidden prophecy... a forgotten magic... an unlikely hero...";
const SUBMIT_LABEL: &str = "Craft My Outline";

const BASE_CSS: &str = r#"
.main-title {
    text-align: center;
    font-size: 72px !important;
    font-weight: 800;
    color: #ffffff !important;
    margin-bottom: 15px;
    text-shadow: 3px 3px 12px #000000;
    padding: 30px;
    background: rgba(20, 20, 40, 0.7);
    border-radius: 20px;
    text-transform: uppercase;
    letter-spacing: 3px;
    border: 2px solid rgba(255,255,255,0.2);
}
.sub-title {
    text-align: center;
    font-size: 22px;
    color: #ffffff;
    margin-bottom: 40px;
    text-shadow: 2px 2px 6px #000000;
    background: rgba(0, 0, 0, 0.6);
    padding: 15px;
    border-radius: 10px;
    max-width: 80%;
    margin-left: auto;
    margin-right: auto;
}
.layout {
    display: flex;
    gap: 30px;
    align-items: flex-start;
}
.input-column {
    flex: 1;
}
.output-column {
    flex: 2;
}
.input-column label {
    display: block;
    color: #ffffff;
    font-weight: 600;
    margin-bottom: 8px;
    text-shadow: 1px 1px 4px #000000;
}
.craft-button {
    background-color: #4CAF50 !important;
    color: white !important;
    font-size: 18px !important;
    padding: 16px 24px !important;
    border-radius: 8px !important;
    margin-top: 20px !important;
    border: none !important;
    transition: all 0.3s ease !important;
    cursor: pointer;
}
.craft-button:hover {
    background-color: #3e8e41 !important;
    transform: scale(1.05) !important;
    box-shadow: 0 4px 12px rgba(0,0,0,0.3) !important;
}
#output-box {
    height: 600px;
    overflow-y: scroll;
    padding: 25px;
    background-color: rgba(255, 255, 255, 0.92) !important;
    border: 1px solid #cccccc !important;
    border-radius: 15px !important;
    box-shadow: 0 6px 20px rgba(0,0,0,0.15) !important;
}
.textbox {
    width: 100%;
    box-sizing: border-box;
    padding: 12px;
    border-radius: 8px;
    background: rgba(255,255,255,0.9) !important;
}
.error {
    color: #b00020;
    font-weight: 600;
}
"#;

/// Builds the page stylesheet around a base64 JPEG background.
///
/// An empty `encoded_image` yields a stylesheet without any `data:` URL.
#[must_use]
pub fn stylesheet(encoded_image: &str) -> String {
    let background = if encoded_image.is_empty() {
        "#1f1b2e".to_string()
    } else {
        format!("url('data:image/jpeg;base64,{encoded_image}') !important")
    };

    format!(
        r".page-container {{
    background: {background};
    background-size: cover !important;
    background-position: center !important;
    background-attachment: fixed !important;
    min-height: 100vh;
    padding: 30px;
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
}}{BASE_CSS}"
    )
}

/// Everything the page template needs for one response.
#[derive(Debug, Clone, Copy, Default)]
pub struct Page<'a> {
    /// Stylesheet produced by [`stylesheet`].
    pub stylesheet: &'a str,
    /// Idea to keep in the text area.
    pub idea: &'a str,
    /// Pre-rendered HTML for the output pane.
    pub output_html: &'a str,
    /// Plain-text error shown above the output pane.
    pub error: Option<&'a str>,
}

impl<'a> Page<'a> {
    /// Creates an empty page using a stylesheet.
    #[must_use]
    pub fn new(stylesheet: &'a str) -> Self {
        Self {
            stylesheet,
            ..Self::default()
        }
    }

    /// Sets the idea echoed back into the form.
    #[must_use]
    pub fn with_idea(mut self, idea: &'a str) -> Self {
        self.idea = idea;
        self
    }

    /// Sets the output pane HTML.
    #[must_use]
    pub fn with_output(mut self, output_html: &'a str) -> Self {
        self.output_html = output_html;
        self
    }

    /// Sets an error message.
    #[must_use]
    pub fn with_error(mut self, error: &'a str) -> Self {
        self.error = Some(error);
        self
    }
}

/// Renders the full HTML document.
///
/// The idea and error are entity-encoded. The output HTML is inserted verbatim.
#[must_use]
pub fn render_page(page: &Page<'_>) -> String {
    let error = page
        .error
        .map(|e| format!("<p class=\"error\">{}</p>\n", encode_text(e)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{PAGE_TITLE}</title>
<style>
{css}
</style>
</head>
<body class="page-container">
<div class="main-title">{PAGE_TITLE}</div>
<div class="sub-title">{SUBTITLE}</div>
<div class="layout">
<form class="input-column" method="post" action="/">
<label for="idea">{IDEA_LABEL}</label>
<textarea id="idea" name="idea" class="textbox" rows="5" placeholder="{IDEA_PLACEHOLDER}">{idea}</textarea>
<button type="submit" class="craft-button">{SUBMIT_LABEL}</button>
</form>
<div class="output-column">
{error}<div id="output-box">
{output}</div>
</div>
</div>
</body>
</html>
"#,
        css = page.stylesheet,
        idea = encode_text(page.idea),
        output = page.output_html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stylesheet_without_image_has_no_data_url() {
        let css = stylesheet("");

        assert!(!css.contains("data:"));
        assert!(css.contains(".page-container"));
        assert!(css.contains("#output-box"));
    }

    #[test]
    fn test_stylesheet_with_image() {
        let css = stylesheet("ZHJhZ29u");

        assert!(css.contains("url('data:image/jpeg;base64,ZHJhZ29u') !important"));
    }

    #[test]
    fn test_render_empty_page() {
        let css = stylesheet("");
        let html = render_page(&Page::new(&css));

        assert!(html.contains("<title>Fantasy Novel Outline Generator</title>"));
        assert!(html.contains("<textarea id=\"idea\" name=\"idea\""));
        assert!(html.contains(IDEA_PLACEHOLDER));
        assert!(html.contains(">Craft My Outline</button>"));
        assert!(html.contains("<div id=\"output-box\">\n</div>"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_render_page_with_output_and_idea() {
        let html = render_page(
            &Page::new("")
                .with_idea("<b>egg</b>")
                .with_output("<div class=\"outline-output\"><p>Done</p></div>"),
        );

        assert!(html.contains(">&lt;b&gt;egg&lt;/b&gt;</textarea>"));
        assert!(html.contains("<div id=\"output-box\">\n<div class=\"outline-output\"><p>Done</p></div></div>"));
    }

    #[test]
    fn test_render_page_with_error() {
        let html = render_page(&Page::new("").with_error("Stage 3 failed"));

        assert!(html.contains("<p class=\"error\">Stage 3 failed</p>"));
    }

    #[test]
    fn test_render_page_escapes_markup_in_idea_and_error() {
        let html = render_page(
            &Page::new("")
                .with_idea("</textarea><script>alert(1)</script>")
                .with_error("bad <b>gateway</b> & more"),
        );

        assert!(html.contains(">&lt;/textarea&gt;&lt;script&gt;alert(1)&lt;/script&gt;</textarea>"));
        assert!(html.contains("<p class=\"error\">bad &lt;b&gt;gateway&lt;/b&gt; &amp; more</p>"));
        assert!(!html.contains("<script>"));
    }
}
