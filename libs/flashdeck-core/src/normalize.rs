//! String helpers shared by the resolver, classifier and accumulator.

/// Canonical dash every en/em dash is reduced to.
pub const DASH: char = '\u{2013}';

const EM_DASH: char = '\u{2014}';

/// Reduce en and em dashes to [`DASH`]. ASCII hyphens are left alone.
pub fn normalize_dashes(text: &str) -> String {
    text.chars()
        .map(|c| if c == EM_DASH { DASH } else { c })
        .collect()
}

/// Split on line boundaries and strip trailing whitespace from each line.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Leading whitespace is kept.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .flat_map(|line| line.split('\r'))
        .map(str::trim_end)
        .collect()
}

/// Collapse every whitespace run into a single space and trim both ends.
pub fn collapse_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop leading dash and colon remnants left behind by malformed markers.
pub fn strip_leading_artifacts(text: &str) -> &str {
    text.trim_start_matches(|c: char| c == '-' || c == DASH || c == ':' || c.is_whitespace())
        .trim_end()
}
