//! HTML document template for publication output.
//!
//! Wraps a rendered body fragment into a standalone HTML5 document with
//! metadata, the embedded stylesheet and an optional footer.

use std::fmt::Write;

use crate::style::stylesheet;

/// Options for wrapping a rendered body into a full document.
#[derive(Debug, Clone, Default)]
pub struct WrapOptions {
    /// Document `<title>`.
    pub title: String,
    /// Value for the `author` meta tag.
    pub author: Option<String>,
    /// Value for the `description` meta tag.
    pub description: Option<String>,
    /// Use print-oriented page sizing and font scaling.
    pub pdf_ready: bool,
    /// Footer lines; no footer is rendered when empty.
    pub footer: Vec<String>,
}

/// Wrap an HTML body fragment into a complete HTML document.
///
/// Metadata and footer text are escaped; `body_html` is inserted verbatim.
///
/// # Example
///
/// ```
/// use pubmd_publish::{WrapOptions, wrap};
///
/// let options = WrapOptions {
///     title: "Results".to_owned(),
///     ..WrapOptions::default()
/// };
/// let html = wrap("<p>Hello</p>", &options);
/// assert!(html.starts_with("<!DOCTYPE html>"));
/// assert!(html.contains("<title>Results</title>"));
/// assert!(html.contains("<body>\n<p>Hello</p>\n"));
/// ```
pub fn wrap(body_html: &str, options: &WrapOptions) -> String {
    let mut html = String::with_capacity(body_html.len() + 8192);

    // DOCTYPE and head
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    if let Some(author) = &options.author {
        let _ = writeln!(html, "<meta name=\"author\" content=\"{}\">", escape(author));
    }
    if let Some(description) = &options.description {
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape(description)
        );
    }
    let _ = writeln!(html, "<title>{}</title>", escape(&options.title));
    html.push_str("<style>\n");
    html.push_str(&stylesheet(options.pdf_ready));
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str(body_html);
    html.push('\n');

    render_footer(&mut html, &options.footer);

    html.push_str("</body>\n</html>");
    html
}

/// Render the publication footer.
fn render_footer(html: &mut String, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    html.push_str("<div class=\"publication-footer\">\n");
    for line in lines {
        let _ = writeln!(html, "<p>{}</p>", escape(line));
    }
    html.push_str("</div>\n");
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
