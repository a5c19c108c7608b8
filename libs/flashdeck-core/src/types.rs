//! Core types for the flashdeck parsing engine.

use serde::{Deserialize, Serialize};

/// A single front/back card produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardRecord {
    /// Term, optionally with a parenthetical tag such as `abhor (v.)`.
    pub front: String,
    /// Definition. Paragraph breaks are kept as `"\n\n"`.
    pub back: String,
}

impl CardRecord {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }

    /// The first side that is empty after trimming, Front taking precedence.
    pub fn empty_side(&self) -> Option<Side> {
        if self.front.trim().is_empty() {
            Some(Side::Front)
        } else if self.back.trim().is_empty() {
            Some(Side::Back)
        } else {
            None
        }
    }
}

/// Side of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Front => "Front",
            Self::Back => "Back",
        }
    }
}

/// Output of a single parse call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseResult {
    pub records: Vec<CardRecord>,
    /// Warnings cite 1-based record indices, never input line numbers.
    pub warnings: Vec<String>,
}

impl ParseResult {
    /// Serialize records as `front<TAB>back` lines.
    ///
    /// Parsing the output again yields the same records when every record has
    /// a non-empty front that does not open with a list marker, and a
    /// non-empty single-paragraph back. A record with an empty back cannot
    /// survive the trip: its trailing tab is trimmed away, so `beta<TAB>`
    /// reads back as a continuation of the record before it.
    pub fn to_tsv(&self) -> String {
        records_to_tsv(&self.records)
    }
}

/// Serialize records as `front<TAB>back` lines.
pub fn records_to_tsv(records: &[CardRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{}\t{}", r.front, r.back))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Separator found between term and definition on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Separator {
    Tab,
    ColonOutsideParens,
    EnEmDash,
    SpacedHyphen,
    DictionaryPattern,
    None,
}

/// Tie-break between an en/em dash and a spaced hyphen on the same line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashPolicy {
    /// Whichever occurs first wins.
    Leftmost,
    /// An en/em dash anywhere on the line beats a spaced hyphen.
    PreferDash,
}

impl Default for DashPolicy {
    fn default() -> Self {
        Self::Leftmost
    }
}

/// Tunable heuristics for the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    pub dash_policy: DashPolicy,
    /// Minimum width of the term zone, in characters.
    pub term_zone_chars: usize,
    /// The term zone also covers `len / term_zone_divisor` characters.
    pub term_zone_divisor: usize,
    /// Longest tag accepted by the dictionary pattern, in characters.
    pub max_tag_chars: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            dash_policy: DashPolicy::default(),
            term_zone_chars: 40,
            term_zone_divisor: 3,
            max_tag_chars: 12,
        }
    }
}

impl ParserOptions {
    /// Width of the term zone for a line of `line_chars` characters.
    pub fn term_zone(&self, line_chars: usize) -> usize {
        let fraction = line_chars / self.term_zone_divisor.max(1);
        self.term_zone_chars.max(fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_side_prefers_front() {
        assert_eq!(CardRecord::new("", "").empty_side(), Some(Side::Front));
        assert_eq!(CardRecord::new(" ", "x").empty_side(), Some(Side::Front));
        assert_eq!(CardRecord::new("x", "  ").empty_side(), Some(Side::Back));
        assert_eq!(CardRecord::new("x", "y").empty_side(), None);
    }

    #[test]
    fn term_zone_is_larger_of_floor_and_third() {
        let options = ParserOptions::default();
        assert_eq!(options.term_zone(30), 40);
        assert_eq!(options.term_zone(120), 40);
        assert_eq!(options.term_zone(150), 50);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: ParserOptions =
            serde_json::from_str(r#"{"dash_policy":"prefer_dash"}"#).unwrap();
        assert_eq!(options.dash_policy, DashPolicy::PreferDash);
        assert_eq!(options.term_zone_chars, 40);
    }

    #[test]
    fn tsv_lines() {
        let result = ParseResult {
            records: vec![CardRecord::new("a", "b"), CardRecord::new("c", "d")],
            warnings: vec![],
        };
        assert_eq!(result.to_tsv(), "a\tb\nc\td");
    }
}
