//! Link parser for extracting entries from document text
//!
//! Each line is checked for two independent patterns:
//! - a title: the first `[...]` on the line (non-greedy)
//! - a URL: the first `(...)` on the line (non-greedy)
//!
//! A line becomes an entry only when it carries a non-empty URL. Everything
//! else (headings, prose, blank lines) is skipped. This is not a markdown
//! parser; nested brackets, reference links and escapes are not understood.

use crate::cache::Entry;
use regex::Regex;
use std::sync::LazyLock;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("title pattern is a valid regex"));

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*?)\)").expect("url pattern is a valid regex"));

/// Parses every `\n`-separated line of `raw_text` into entries
///
/// # Arguments
///
/// * `raw_text` - The full text of one document
///
/// # Returns
///
/// Entries in line order. Never fails; a document with no links yields an
/// empty vector.
///
/// # Example
///
/// ```
/// use link_shelf::sync::parse_entries;
///
/// let entries = parse_entries("# Title\n[Foo](http://x)\nplain line\n");
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].title, "Foo");
/// assert_eq!(entries[0].url, "http://x");
/// ```
pub fn parse_entries(raw_text: &str) -> Vec<Entry> {
    let lines: Vec<&str> = split_lines(raw_text).collect();
    parse_lines(&lines)
}

/// Parses lines that were already split out of a document
pub fn parse_lines(lines: &[&str]) -> Vec<Entry> {
    lines.iter().filter_map(|line| parse_line(line)).collect()
}

/// Splits text on `\n` exactly, keeping a trailing empty line
///
/// `"a\nb\n"` yields three lines. The line count feeds the fetch worker's
/// staleness check, so this must stay in step with how snapshots record it.
pub fn split_lines(raw_text: &str) -> impl Iterator<Item = &str> {
    raw_text.split('\n')
}

/// Parses a single line into an entry, if it has a URL
pub fn parse_line(line: &str) -> Option<Entry> {
    let url = extract_url(line)?;
    let title = extract_title(line).unwrap_or_default();
    Some(Entry {
        title: title.to_string(),
        url: url.to_string(),
    })
}

/// Returns the text inside the first `[...]` on the line
pub fn extract_title(line: &str) -> Option<&str> {
    TITLE_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Returns the text inside the first `(...)` on the line, if non-empty
pub fn extract_url(line: &str) -> Option<&str> {
    URL_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|url| !url.is_empty())
}
