//! Markdown to HTML conversion.
//!
//! The renderer classifies each source line and tracks the open block (list,
//! table) across lines. Inline spans are rendered inside the content of
//! every classified line; fenced code bodies are copied verbatim.

use std::sync::LazyLock;

use regex::Regex;

use crate::fence::FenceScanner;
use crate::inline::render_inline;
use crate::table::{self, Cell};

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,4}) (.+)$").unwrap());
static RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-{3,}$").unwrap());
static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[\-\*]\s+(.+)$").unwrap());
static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\.\s+(.+)$").unwrap());

/// Kind of list block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }

    /// Extract the item content if `line` is an item of this list kind.
    fn item(self, line: &str) -> Option<&str> {
        let pattern = match self {
            Self::Unordered => &UNORDERED_ITEM,
            Self::Ordered => &ORDERED_ITEM,
        };
        pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Position inside an open table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TablePhase {
    /// Header row emitted; the next row may be the separator.
    AfterHeader,
    /// Inside body rows.
    Body,
}

/// Open block state carried between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No block open.
    Normal,
    /// Inside a `<ul>` or `<ol>`.
    InList(ListKind),
    /// Inside a `<table>`.
    InTable(TablePhase),
}

/// Line-oriented markdown renderer.
///
/// Each source line produces zero or more output lines; block wrappers
/// (`<ul>`, `<ol>`, `<table>`) are emitted on their own lines. The output is
/// joined with `\n`, so a trailing newline in the input is preserved.
///
/// # Example
///
/// ```
/// use pubmd_renderer::MarkdownRenderer;
///
/// let html = MarkdownRenderer::new().render("| A | B |\n|---|---|\n| 1 | 2 |");
/// assert!(html.starts_with("<table>\n<thead><tr>\n<th>A</th>"));
/// assert!(html.ends_with("<td>2</td>\n</tr>\n</tbody></table>"));
/// ```
#[derive(Debug)]
pub struct MarkdownRenderer {
    state: State,
    out: Vec<String>,
}

impl MarkdownRenderer {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Normal,
            out: Vec::new(),
        }
    }

    /// Render a markdown document to an HTML body fragment.
    ///
    /// Rendering never fails: unrecognized constructs become paragraphs.
    #[must_use]
    pub fn render(mut self, markdown: &str) -> String {
        let lines: Vec<&str> = markdown
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();

        let fences = FenceScanner::new(&lines);
        let mut idx = 0;
        while idx < lines.len() {
            if let Some(code) = fences.detect(&lines, idx) {
                self.close_block();
                let body = &lines[idx + 1..idx + 1 + code.body_len];
                self.push_code_block(code.lang, body);
                idx += code.span();
                continue;
            }
            self.process_line(lines[idx]);
            idx += 1;
        }
        self.close_block();

        tracing::debug!(
            source_lines = lines.len(),
            output_lines = self.out.len(),
            "Rendered markdown"
        );
        self.out.join("\n")
    }

    /// Classify and emit a single line outside of fenced code.
    fn process_line(&mut self, line: &str) {
        // An open block claims matching lines before any other classification
        match self.state {
            State::InList(kind) => {
                if let Some(content) = kind.item(line) {
                    self.push_item(content);
                    return;
                }
                self.close_block();
            }
            State::InTable(phase) => {
                if table::is_row(line) {
                    self.push_table_row(line, phase);
                    return;
                }
                self.close_block();
            }
            State::Normal => {}
        }

        if let Some(caps) = HEADING.captures(line) {
            let level = caps[1].len();
            let content = render_inline(&caps[2]);
            self.out.push(format!("<h{level}>{content}</h{level}>"));
        } else if RULE.is_match(line) {
            self.out.push("<hr>".to_owned());
        } else if table::is_row(line) {
            self.open_table(line);
        } else if let Some(content) = ListKind::Unordered.item(line) {
            self.open_list(ListKind::Unordered, content);
        } else if let Some(content) = ListKind::Ordered.item(line) {
            self.open_list(ListKind::Ordered, content);
        } else if line.trim().is_empty() {
            self.out.push(line.to_owned());
        } else if line.trim_start().starts_with('<') {
            // Raw HTML passes through without a paragraph wrapper
            self.out.push(render_inline(line));
        } else {
            self.out.push(format!("<p>{}</p>", render_inline(line)));
        }
    }

    fn open_list(&mut self, kind: ListKind, content: &str) {
        self.out.push(format!("<{}>", kind.tag()));
        self.state = State::InList(kind);
        self.push_item(content);
    }

    fn push_item(&mut self, content: &str) {
        self.out.push(format!("<li>{}</li>", render_inline(content)));
    }

    fn open_table(&mut self, header: &str) {
        self.out.push("<table>".to_owned());
        self.out.push("<thead><tr>".to_owned());
        table::render_cells(header, Cell::Header, &mut self.out);
        self.out.push("</tr></thead>".to_owned());
        self.out.push("<tbody>".to_owned());
        self.state = State::InTable(TablePhase::AfterHeader);
    }

    fn push_table_row(&mut self, line: &str, phase: TablePhase) {
        self.state = State::InTable(TablePhase::Body);
        if phase == TablePhase::AfterHeader && table::is_separator(line) {
            return;
        }
        self.out.push("<tr>".to_owned());
        table::render_cells(line, Cell::Data, &mut self.out);
        self.out.push("</tr>".to_owned());
    }

    fn push_code_block(&mut self, lang: &str, body: &[&str]) {
        let body = body.join("\n");
        self.out
            .push(format!(r#"<pre><code class="{lang}">{body}</code></pre>"#));
    }

    /// Close the open list or table, if any.
    fn close_block(&mut self) {
        match self.state {
            State::InList(kind) => self.out.push(format!("</{}>", kind.tag())),
            State::InTable(_) => self.out.push("</tbody></table>".to_owned()),
            State::Normal => return,
        }
        self.state = State::Normal;
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a markdown document to an HTML body fragment.
///
/// Shorthand for `MarkdownRenderer::new().render(markdown)`.
pub fn render(markdown: &str) -> String {
    MarkdownRenderer::new().render(markdown)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn body_rows(html: &str) -> usize {
        html.lines().filter(|line| *line == "<tr>").count()
    }

    #[test]
    fn test_headings_levels_one_to_four() {
        for level in 1..=4 {
            let markdown = format!("{} Section title", "#".repeat(level));
            assert_eq!(
                render(&markdown),
                format!("<h{level}>Section title</h{level}>")
            );
        }
    }

    #[test]
    fn test_five_hashes_is_paragraph() {
        assert_eq!(render("##### Deep"), "<p>##### Deep</p>");
    }

    #[test]
    fn test_hash_without_space_is_paragraph() {
        assert_eq!(render("#tag"), "<p>#tag</p>");
    }

    #[test]
    fn test_heading_inline_content() {
        assert_eq!(
            render("## The **key** result"),
            "<h2>The <strong>key</strong> result</h2>"
        );
    }

    #[test]
    fn test_bold_paragraph() {
        assert_eq!(render("**bold**"), "<p><strong>bold</strong></p>");
    }

    #[test]
    fn test_italic_paragraph() {
        assert_eq!(render("*italic*"), "<p><em>italic</em></p>");
    }

    #[test]
    fn test_link_paragraph() {
        assert_eq!(
            render("[text](http://example.com)"),
            r#"<p><a href="http://example.com">text</a></p>"#
        );
    }

    #[test]
    fn test_blank_line_between_paragraphs() {
        assert_eq!(render("one\n\ntwo"), "<p>one</p>\n\n<p>two</p>");
    }

    #[test]
    fn test_whitespace_only_line_passes_through() {
        assert_eq!(render("one\n   \ntwo"), "<p>one</p>\n   \n<p>two</p>");
    }

    #[test]
    fn test_trailing_newline_preserved() {
        assert_eq!(render("text\n"), "<p>text</p>\n");
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(render("# A\r\nb\r\n"), "<h1>A</h1>\n<p>b</p>\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_unordered_list_closes_before_next_line() {
        assert_eq!(
            render("- a\n- b\n- c\nafter"),
            "<ul>\n<li>a</li>\n<li>b</li>\n<li>c</li>\n</ul>\n<p>after</p>"
        );
    }

    #[test]
    fn test_star_and_indented_items_share_list() {
        assert_eq!(
            render("* a\n  - b"),
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            render("1. first\n2. second"),
            "<ol>\n<li>first</li>\n<li>second</li>\n</ol>"
        );
    }

    #[test]
    fn test_switching_list_kind_closes_previous_list() {
        assert_eq!(
            render("- a\n1. b"),
            "<ul>\n<li>a</li>\n</ul>\n<ol>\n<li>b</li>\n</ol>"
        );
    }

    #[test]
    fn test_blank_line_splits_lists() {
        assert_eq!(
            render("- a\n\n- b"),
            "<ul>\n<li>a</li>\n</ul>\n\n<ul>\n<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn test_list_item_inline_markup() {
        assert_eq!(
            render("- **Key**: `value`"),
            "<ul>\n<li><strong>Key</strong>: <code>value</code></li>\n</ul>"
        );
    }

    #[test]
    fn test_bold_line_is_not_a_list_item() {
        assert_eq!(render("**Note** text"), "<p><strong>Note</strong> text</p>");
    }

    #[test]
    fn test_table_with_separator() {
        let markdown = "| A | B |\n|---|---|\n| 1 | 2 |";
        assert_eq!(
            render(markdown),
            "<table>\n<thead><tr>\n<th>A</th>\n<th>B</th>\n</tr></thead>\n<tbody>\n\
             <tr>\n<td>1</td>\n<td>2</td>\n</tr>\n</tbody></table>"
        );
    }

    #[test]
    fn test_table_separator_produces_no_row() {
        let html = render("| A | B |\n|---|---|\n| 1 | 2 |");
        assert_eq!(body_rows(&html), 1);
        assert_eq!(html.matches("<thead><tr>").count(), 1);
        assert_eq!(html.matches("<th>").count(), 2);
        assert_eq!(html.matches("<td>").count(), 2);
    }

    #[test]
    fn test_table_without_separator() {
        assert_eq!(
            render("| A |\n| 1 |"),
            "<table>\n<thead><tr>\n<th>A</th>\n</tr></thead>\n<tbody>\n\
             <tr>\n<td>1</td>\n</tr>\n</tbody></table>"
        );
    }

    #[test]
    fn test_separator_shaped_body_row_is_kept() {
        let html = render("| A |\n|---|\n| 1 |\n|---|");
        assert_eq!(body_rows(&html), 2);
        assert!(html.contains("<td>---</td>"));
    }

    #[test]
    fn test_indented_separator_is_a_body_row() {
        let html = render("  | A |\n  |---|\n  | 1 |");
        assert_eq!(body_rows(&html), 2);
        assert!(html.contains("<tr>\n<td>---</td>\n</tr>\n<tr>\n<td>1</td>\n</tr>"));
    }

    #[test]
    fn test_header_only_table() {
        assert_eq!(
            render("| A |"),
            "<table>\n<thead><tr>\n<th>A</th>\n</tr></thead>\n<tbody>\n</tbody></table>"
        );
    }

    #[test]
    fn test_table_closed_by_paragraph() {
        let html = render("| A |\n|---|\n| 1 |\nText");
        assert!(html.ends_with("</tbody></table>\n<p>Text</p>"));
    }

    #[test]
    fn test_table_cell_inline_markup() {
        let html = render("| Model | Score |\n|---|---|\n| [RF](rf.html) | **0.98** |");
        assert!(html.contains(r#"<td><a href="rf.html">RF</a></td>"#));
        assert!(html.contains("<td><strong>0.98</strong></td>"));
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(render("---"), "<hr>");
        assert_eq!(render("-----"), "<hr>");
        assert_eq!(render("--"), "<p>--</p>");
    }

    #[test]
    fn test_fenced_code_block() {
        assert_eq!(
            render("```python\nx = 1\ny = 2\n```"),
            "<pre><code class=\"python\">x = 1\ny = 2</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_without_language() {
        assert_eq!(
            render("```\nraw\n```"),
            "<pre><code class=\"\">raw</code></pre>"
        );
    }

    #[test]
    fn test_empty_fenced_code_block() {
        assert_eq!(render("```\n```"), "<pre><code class=\"\"></code></pre>");
    }

    #[test]
    fn test_fenced_code_body_is_verbatim() {
        assert_eq!(
            render("```\n# not a heading\n- **not** a list\n```"),
            "<pre><code class=\"\"># not a heading\n- **not** a list</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_closes_open_list() {
        assert_eq!(
            render("- a\n```\nb\n```"),
            "<ul>\n<li>a</li>\n</ul>\n<pre><code class=\"\">b</code></pre>"
        );
    }

    #[test]
    fn test_unclosed_fence_falls_through() {
        let html = render("```rust\nlet x;");
        assert!(!html.contains("<pre>"));
        assert!(html.ends_with("\n<p>let x;</p>"));
    }

    #[test]
    fn test_many_unclosed_fences() {
        let markdown = "```py\nx\n".repeat(20_000);
        let html = render(&markdown);
        assert!(!html.contains("<pre>"));
        assert_eq!(html.matches("<p>x</p>").count(), 20_000);
        assert_eq!(html.lines().count(), 40_000);
    }

    #[test]
    fn test_raw_html_not_wrapped() {
        assert_eq!(render("<div>x</div>"), "<div>x</div>");
        assert_eq!(render("  <br>"), "  <br>");
    }

    #[test]
    fn test_raw_html_gets_inline_markup() {
        assert_eq!(
            render("<span>**x**</span>"),
            "<span><strong>x</strong></span>"
        );
    }

    #[test]
    fn test_paragraph_keeps_leading_whitespace() {
        assert_eq!(render("  indented"), "<p>  indented</p>");
    }

    #[test]
    fn test_table_row_closes_list() {
        assert_eq!(
            render("- a\n| b |"),
            "<ul>\n<li>a</li>\n</ul>\n<table>\n<thead><tr>\n<th>b</th>\n</tr></thead>\n\
             <tbody>\n</tbody></table>"
        );
    }

    #[test]
    fn test_renderer_default() {
        assert_eq!(MarkdownRenderer::default().render("x"), "<p>x</p>");
    }
}
