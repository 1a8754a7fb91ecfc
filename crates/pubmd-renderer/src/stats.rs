//! Source document statistics.

use std::sync::LazyLock;

use regex::Regex;

static HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#+\s+").unwrap());
static TABLE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\|.+\|$").unwrap());

/// Summary counts for a markdown source.
///
/// The code block and table figures are estimates: code blocks are half the
/// number of fence markers, tables are half the number of pipe-table lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    /// Number of lines (split on `\n`).
    pub lines: usize,
    /// Number of whitespace-separated words.
    pub words: usize,
    /// Number of characters.
    pub characters: usize,
    /// Number of lines starting with a `#` run followed by whitespace.
    pub headers: usize,
    /// Estimated number of fenced code blocks.
    pub code_blocks: usize,
    /// Estimated number of tables.
    pub tables: usize,
}

impl DocumentStats {
    /// Collect statistics from a markdown source.
    ///
    /// # Example
    ///
    /// ```
    /// use pubmd_renderer::DocumentStats;
    ///
    /// let stats = DocumentStats::collect("# Title\n\nSome words here");
    /// assert_eq!(stats.lines, 3);
    /// assert_eq!(stats.words, 5);
    /// assert_eq!(stats.headers, 1);
    /// ```
    pub fn collect(markdown: &str) -> Self {
        Self {
            lines: markdown.split('\n').count(),
            words: markdown.split_whitespace().count(),
            characters: markdown.chars().count(),
            headers: HEADER.find_iter(markdown).count(),
            code_blocks: markdown.matches("```").count() / 2,
            tables: TABLE_LINE.find_iter(markdown).count() / 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let stats = DocumentStats::collect("");
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.words, 0);
        assert_eq!(stats.characters, 0);
        assert_eq!(stats.headers, 0);
    }

    #[test]
    fn test_counts_headers_of_any_depth() {
        let stats = DocumentStats::collect("# A\n## B\n###### C\n#no\ntext # not");
        assert_eq!(stats.headers, 3);
    }

    #[test]
    fn test_counts_code_blocks() {
        let stats = DocumentStats::collect("```py\nx\n```\n\n```\ny\n```\n");
        assert_eq!(stats.code_blocks, 2);
    }

    #[test]
    fn test_counts_tables() {
        let markdown = "| A | B |\n|---|---|\n| 1 | 2 |\n| 3 | 4 |\n";
        let stats = DocumentStats::collect(markdown);
        assert_eq!(stats.tables, 2);
    }

    #[test]
    fn test_characters_are_unicode_scalars() {
        let stats = DocumentStats::collect("héllo");
        assert_eq!(stats.characters, 5);
    }

    #[test]
    fn test_trailing_newline_counts_as_line() {
        assert_eq!(DocumentStats::collect("a\nb\n").lines, 3);
    }
}
