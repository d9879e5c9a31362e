//! Presentation helpers for the outline page.
//!
//! This module provides:
//! - Markdown to HTML conversion and the styled output container
//! - Background image loading as base64
//! - The page stylesheet and the full HTML document

mod background;
mod markdown;
mod page;

pub use background::load_background;
pub use markdown::{format_output, markdown_to_html, wrap_styled, OUTPUT_CLASS};
pub use page::{render_page, stylesheet, Page, PAGE_TITLE};
