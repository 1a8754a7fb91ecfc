//! Golden output test for a representative publication.

use pretty_assertions::assert_eq;
use pubmd_renderer::{DocumentStats, render};

const SOURCE: &str = include_str!("fixtures/publication.md");
const EXPECTED: &str = include_str!("fixtures/publication.html");

#[test]
fn publication_matches_golden_output() {
    assert_eq!(render(SOURCE), EXPECTED);
}

#[test]
fn publication_statistics() {
    let stats = DocumentStats::collect(SOURCE);
    assert_eq!(stats.lines, 25);
    assert_eq!(stats.headers, 2);
    assert_eq!(stats.code_blocks, 1);
    assert_eq!(stats.tables, 2);
}
