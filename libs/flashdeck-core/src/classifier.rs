//! Decides whether a line starts a new card or continues the open one.

use crate::separator::{boundary, resolve, SplitLine};
use crate::types::{ParserOptions, Separator};

/// List marker found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `-`, `*` or `•`.
    Bullet(char),
    /// `1.` or `1)`, holding the number.
    Numbered(u64),
}

/// Classification of a trimmed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    ItemStart {
        marker: Option<Marker>,
        /// Line content with the marker removed.
        content: &'a str,
        split: SplitLine,
    },
    Continuation { content: &'a str },
}

/// Remove a leading bullet or number marker followed by whitespace.
pub fn strip_marker(line: &str) -> (Option<Marker>, &str) {
    let mut chars = line.chars();
    if let Some(first @ ('-' | '*' | '\u{2022}')) = chars.next() {
        let rest = chars.as_str();
        if rest.starts_with(char::is_whitespace) {
            return (Some(Marker::Bullet(first)), rest.trim_start());
        }
        return (None, line);
    }

    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return (None, line);
    }
    let rest = &line[digits..];
    if let Some(after) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
        if after.starts_with(char::is_whitespace) {
            // Overflowing numbers still count as a marker.
            let number = line[..digits].parse().unwrap_or(u64::MAX);
            return (Some(Marker::Numbered(number)), after.trim_start());
        }
    }
    (None, line)
}

/// Classify one line. Leading and trailing whitespace is ignored.
pub fn classify<'a>(line: &'a str, options: &ParserOptions) -> LineKind<'a> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }

    let (marker, content) = strip_marker(line);
    let split = resolve(content, options);

    // A tab anywhere is an explicit term boundary.
    let starts_item = marker.is_some()
        || match boundary(content, options.dash_policy) {
            Some((Separator::Tab, _)) => true,
            Some((_, at)) => at <= options.term_zone(content.chars().count()),
            None => false,
        };

    if starts_item {
        LineKind::ItemStart {
            marker,
            content,
            split,
        }
    } else {
        LineKind::Continuation { content }
    }
}
