//! Fenced code block detection.
//!
//! Only backtick fences are recognized. An opening fence is three backticks
//! followed by an optional word-character language tag; a closing fence is a
//! line of three or more backticks.

use std::sync::LazyLock;

use regex::Regex;

static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*```(\w*)\s*$").unwrap());

/// A fenced code block located in a slice of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fence<'a> {
    /// Language tag from the opening fence (may be empty).
    pub(crate) lang: &'a str,
    /// Number of body lines between the opening and closing fences.
    pub(crate) body_len: usize,
}

impl Fence<'_> {
    /// Total number of lines covered, fences included.
    pub(crate) fn span(&self) -> usize {
        self.body_len + 2
    }
}

/// Fenced code block locator for a whole document.
///
/// Closing fence positions are indexed once up front, so detecting a block
/// at any line is a constant-time lookup.
#[derive(Debug)]
pub(crate) struct FenceScanner {
    /// For each line index, the first closing fence at or after it.
    next_close: Vec<Option<usize>>,
}

impl FenceScanner {
    /// Index closing fences in `lines`.
    pub(crate) fn new(lines: &[&str]) -> Self {
        let mut next_close = vec![None; lines.len() + 1];
        for idx in (0..lines.len()).rev() {
            next_close[idx] = if is_closing_fence(lines[idx]) {
                Some(idx)
            } else {
                next_close[idx + 1]
            };
        }
        Self { next_close }
    }

    /// Detect a complete fenced code block starting at `lines[idx]`.
    ///
    /// `lines` must be the slice the scanner was built from. Returns `None`
    /// if the line is not an opening fence or if no closing fence follows
    /// it. An unclosed fence is not a code block.
    pub(crate) fn detect<'a>(&self, lines: &[&'a str], idx: usize) -> Option<Fence<'a>> {
        let first: &'a str = *lines.get(idx)?;
        let lang = OPENING_FENCE
            .captures(first)?
            .get(1)
            .map_or("", |m| m.as_str());
        let close = (*self.next_close.get(idx + 1)?)?;
        Some(Fence {
            lang,
            body_len: close - idx - 1,
        })
    }
}

/// Check if a line is a closing fence.
///
/// The fence must be at least three backticks, optionally indented, with
/// only whitespace after it.
fn is_closing_fence(line: &str) -> bool {
    let trimmed = line.trim_start();
    let count = trimmed.chars().take_while(|&c| c == '`').count();
    if count < 3 {
        return false;
    }
    trimmed[count..].chars().all(char::is_whitespace)
}
