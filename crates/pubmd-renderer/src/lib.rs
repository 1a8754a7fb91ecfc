//! Line-oriented markdown renderer for research publications.
//!
//! This crate converts a markdown document into an HTML body fragment using a
//! line-classification state machine. It understands a deliberately small
//! dialect:
//!
//! - `#` to `####` headings
//! - `**bold**`, `*italic*`, `` `code` `` and `[text](url)` inline spans
//! - fenced code blocks with an optional language tag
//! - `---` horizontal rules
//! - pipe tables with a header row
//! - unordered (`-`/`*`) and ordered (`1.`) lists
//! - paragraphs, one per source line
//!
//! Lines that already start with `<` are treated as raw HTML and are never
//! wrapped in `<p>`. Text is not HTML-escaped: input is trusted.
//!
//! # Example
//!
//! ```
//! use pubmd_renderer::render;
//!
//! let html = render("# Title\n\n- **one**\n- two");
//! assert_eq!(
//!     html,
//!     "<h1>Title</h1>\n\n<ul>\n<li><strong>one</strong></li>\n<li>two</li>\n</ul>"
//! );
//! ```

mod fence;
mod inline;
mod renderer;
mod stats;
mod table;

pub use inline::render_inline;
pub use renderer::{MarkdownRenderer, render};
pub use stats::DocumentStats;
