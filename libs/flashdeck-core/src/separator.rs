//! Term/definition split point resolution for a single line.
//!
//! Rules are tried in a fixed order and the first one that matches wins:
//!
//! 1. dictionary entries such as `abhor (v.) to hate`
//! 2. the first tab
//! 3. the first colon outside parentheses
//! 4. the first en/em dash or whitespace-surrounded hyphen
//!
//! A line with no separator becomes a front with an empty back.

use crate::normalize::{strip_leading_artifacts, DASH};
use crate::types::{DashPolicy, ParserOptions, Separator};

/// A line split into its term and definition halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLine {
    pub separator: Separator,
    pub front: String,
    pub back: String,
    /// Character index at which the separator starts.
    pub position: Option<usize>,
}

impl SplitLine {
    fn whole(content: &str) -> Self {
        Self {
            separator: Separator::None,
            front: content.trim().to_string(),
            back: String::new(),
            position: None,
        }
    }
}

/// Split `content` (marker already removed) at its best separator.
pub fn resolve(content: &str, options: &ParserOptions) -> SplitLine {
    if let Some(entry) = match_dictionary(content, options.max_tag_chars) {
        return SplitLine {
            separator: Separator::DictionaryPattern,
            front: format!("{} ({})", entry.term, entry.tag),
            back: entry.definition.to_string(),
            position: Some(char_index(content, entry.close_paren)),
        };
    }

    match locate(content, options.dash_policy) {
        Some((separator, at, ch)) => SplitLine {
            separator,
            front: strip_leading_artifacts(&content[..at]).to_string(),
            back: content[at + ch.len_utf8()..].trim().to_string(),
            position: Some(char_index(content, at)),
        },
        None => SplitLine::whole(content),
    }
}

struct DictionaryEntry<'a> {
    term: &'a str,
    tag: &'a str,
    definition: &'a str,
    close_paren: usize,
}

/// Match `TERM (TAG) DEFINITION` against the whole line.
fn match_dictionary(line: &str, max_tag_chars: usize) -> Option<DictionaryEntry<'_>> {
    let open = line.find('(')?;
    let term = line[..open].trim();
    if term.is_empty() || term.contains(')') {
        return None;
    }

    let close = open + 1 + line[open + 1..].find(')')?;
    let tag = line[open + 1..close].trim();
    if tag.is_empty() || tag.contains('(') || tag.chars().count() > max_tag_chars {
        return None;
    }

    let rest = &line[close + 1..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let definition = strip_definition_lead(rest.trim());
    if definition.is_empty() {
        return None;
    }

    Some(DictionaryEntry {
        term,
        tag,
        definition,
        close_paren: close,
    })
}

/// Remove a separator typed between the tag and the definition, as in `(v.) : to hate`.
fn strip_definition_lead(definition: &str) -> &str {
    let stripped = definition
        .strip_prefix(':')
        .or_else(|| definition.strip_prefix(DASH))
        .or_else(|| {
            definition
                .strip_prefix('-')
                .filter(|rest| rest.starts_with(char::is_whitespace))
        });
    match stripped {
        Some(rest) => rest.trim_start(),
        None => definition,
    }
}

/// Character index of the tab, colon or dash that rules 2 to 4 would split at.
///
/// Dictionary entries are not considered: a short parenthetical in wrapped
/// prose must not look like a term boundary.
pub fn boundary(content: &str, policy: DashPolicy) -> Option<(Separator, usize)> {
    locate(content, policy).map(|(separator, at, _)| (separator, char_index(content, at)))
}

/// Byte offset and character of the separator chosen by rules 2 to 4.
fn locate(content: &str, policy: DashPolicy) -> Option<(Separator, usize, char)> {
    if let Some(at) = content.find('\t') {
        return Some((Separator::Tab, at, '\t'));
    }
    if let Some(at) = first_colon_outside_parens(content) {
        return Some((Separator::ColonOutsideParens, at, ':'));
    }

    let dash = content.find(DASH);
    let hyphen = first_spaced_hyphen(content);
    let pick_dash = match (dash, hyphen, policy) {
        (Some(_), None, _) => true,
        (None, Some(_), _) => false,
        (Some(d), Some(h), DashPolicy::Leftmost) => d < h,
        (Some(_), Some(_), DashPolicy::PreferDash) => true,
        (None, None, _) => return None,
    };

    if pick_dash {
        dash.map(|at| (Separator::EnEmDash, at, DASH))
    } else {
        hyphen.map(|at| (Separator::SpacedHyphen, at, '-'))
    }
}

/// Byte offset of the first `:` at parenthesis depth zero.
pub fn first_colon_outside_parens(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Byte offset of the first `-` with whitespace on both sides.
pub fn first_spaced_hyphen(s: &str) -> Option<usize> {
    let mut prev: Option<char> = None;
    let mut chars = s.char_indices().peekable();
    while let Some((i, ch)) = chars.next() {
        if ch == '-' {
            let before = prev.is_some_and(char::is_whitespace);
            let after = chars.peek().is_some_and(|&(_, next)| next.is_whitespace());
            if before && after {
                return Some(i);
            }
        }
        prev = Some(ch);
    }
    None
}

fn char_index(s: &str, byte: usize) -> usize {
    s[..byte].chars().count()
}
