//! Inline span rendering.
//!
//! Spans are rendered in a fixed order: bold, italic, inline code, links.
//! Each step runs on the output of the previous one, so `**` markers are
//! already consumed when italics are matched.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.+?)\]\((.+?)\)").unwrap());

/// Render inline markdown spans within a single line.
///
/// Matching is non-greedy and escaped markers (`\*`) are not supported.
///
/// # Examples
///
/// ```
/// use pubmd_renderer::render_inline;
///
/// assert_eq!(
///     render_inline("**bold** and *italic*"),
///     "<strong>bold</strong> and <em>italic</em>"
/// );
/// assert_eq!(
///     render_inline("[docs](https://example.com)"),
///     r#"<a href="https://example.com">docs</a>"#
/// );
/// ```
pub fn render_inline(text: &str) -> String {
    let text = BOLD.replace_all(text, "<strong>${1}</strong>");
    let text = emphasize(&text);
    let text = CODE.replace_all(&text, "<code>${1}</code>");
    LINK.replace_all(&text, r#"<a href="${2}">${1}</a>"#)
        .into_owned()
}

/// Replace `*text*` with `<em>text</em>`.
///
/// A `*` counts as a marker only when neither neighbor is another `*`, so
/// leftover `**` runs never open or close an italic span. The span body must
/// be non-empty and is matched non-greedily.
fn emphasize(text: &str) -> String {
    let bytes = text.as_bytes();
    let is_marker = |i: usize| {
        bytes[i] == b'*' && (i == 0 || bytes[i - 1] != b'*') && bytes.get(i + 1) != Some(&b'*')
    };

    let mut out = String::with_capacity(text.len() + 16);
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if is_marker(i) {
            // No closing marker after the first opener means none after any later one
            let Some(close) = (i + 2..bytes.len()).find(|&j| is_marker(j)) else {
                break;
            };
            out.push_str(&text[copied..i]);
            out.push_str("<em>");
            out.push_str(&text[i + 1..close]);
            out.push_str("</em>");
            i = close + 1;
            copied = i;
        } else {
            i += 1;
        }
    }
    out.push_str(&text[copied..]);
    out
}
