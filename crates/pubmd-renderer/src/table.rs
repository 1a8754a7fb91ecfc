//! Pipe table row detection and cell splitting.

use std::sync::LazyLock;

use regex::Regex;

use crate::inline::render_inline;

static TABLE_ROW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\|.*\|\s*$").unwrap());
static SEPARATOR_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|[\s\-:|]+\|$").unwrap());

/// Cell kind within a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cell {
    Header,
    Data,
}

impl Cell {
    fn tag(self) -> &'static str {
        match self {
            Self::Header => "th",
            Self::Data => "td",
        }
    }
}

/// Check if a line is a pipe table row.
pub(crate) fn is_row(line: &str) -> bool {
    TABLE_ROW.is_match(line)
}

/// Check if a table row is a header separator such as `|---|:--:|`.
///
/// The check is structural only: column counts are not compared with the
/// header. The line is matched as-is, so an indented separator is not one.
pub(crate) fn is_separator(line: &str) -> bool {
    SEPARATOR_ROW.is_match(line)
}

/// Split a table row into trimmed cells, dropping the outer empty fields
/// produced by the leading and trailing pipes.
pub(crate) fn split_cells(line: &str) -> Vec<&str> {
    let fields: Vec<&str> = line.trim().split('|').collect();
    if fields.len() < 2 {
        return Vec::new();
    }
    fields[1..fields.len() - 1]
        .iter()
        .map(|cell| cell.trim())
        .collect()
}

/// Render a row's cells, one `<th>`/`<td>` element per output line.
pub(crate) fn render_cells(line: &str, cell: Cell, out: &mut Vec<String>) {
    let tag = cell.tag();
    for content in split_cells(line) {
        out.push(format!("<{tag}>{}</{tag}>", render_inline(content)));
    }
}
