//! Free-form text parser for flashcard decks.
//!
//! Accepts pasted or OCR-extracted text in any mix of these shapes:
//! ```text
//! abhor (v.) : to hate, detest
//! - benevolent (adj.) well meaning; kindly
//!
//! 1) photosynthesis — process by which plants make food
//! - mitosis - cell division into two daughter cells
//! Solar system<TAB>Sun and its planets
//! ```
//!
//! Lines without a separator near their start continue the previous
//! definition. Blank lines inside a definition become paragraph breaks.

use crate::classifier::{classify, LineKind};
use crate::normalize::{collapse_spaces, normalize_dashes, split_lines, strip_leading_artifacts};
use crate::separator::{resolve, SplitLine};
use crate::types::{CardRecord, ParseResult, ParserOptions};
use crate::validate::validate;

/// Parse text into card records using the default heuristics.
///
/// Never fails: ambiguous input yields records with empty sides and a
/// matching warning.
pub fn parse(text: &str) -> ParseResult {
    parse_with(text, &ParserOptions::default())
}

/// Parse text into card records.
pub fn parse_with(text: &str, options: &ParserOptions) -> ParseResult {
    let text = normalize_dashes(text);
    let mut parser = Parser::new(options);

    for line in split_lines(&text) {
        parser.process_line(line);
    }

    let records = parser.finalize();
    let warnings = validate(&records);

    tracing::debug!(
        records = records.len(),
        warnings = warnings.len(),
        "parsed free text"
    );

    ParseResult { records, warnings }
}

/// A record being accumulated.
struct CardBuilder {
    front: String,
    /// Definition fragments. `None` marks a paragraph break.
    fragments: Vec<Option<String>>,
}

impl CardBuilder {
    fn from_split(split: SplitLine) -> Self {
        let mut fragments = Vec::new();
        if !split.back.is_empty() {
            fragments.push(Some(split.back));
        }
        Self {
            front: split.front,
            fragments,
        }
    }

    fn push_text(&mut self, text: &str) {
        self.fragments.push(Some(text.to_string()));
    }

    fn push_break(&mut self) {
        self.fragments.push(None);
    }

    fn build(self) -> CardRecord {
        let paragraphs: Vec<String> = self
            .fragments
            .split(Option::is_none)
            .map(|run| {
                let joined = run.iter().flatten().map(String::as_str).collect::<Vec<_>>();
                collapse_spaces(&joined.join(" "))
            })
            .filter(|p| !p.is_empty())
            .collect();

        CardRecord {
            front: collapse_spaces(strip_leading_artifacts(&self.front)),
            back: paragraphs.join("\n\n"),
        }
    }
}

/// Accumulator state machine: `current` is `None` while idle.
struct Parser<'o> {
    options: &'o ParserOptions,
    current: Option<CardBuilder>,
    records: Vec<CardRecord>,
}

impl<'o> Parser<'o> {
    fn new(options: &'o ParserOptions) -> Self {
        Self {
            options,
            current: None,
            records: Vec::new(),
        }
    }

    fn process_line(&mut self, line: &str) {
        match classify(line, self.options) {
            LineKind::Blank => {
                if let Some(card) = self.current.as_mut() {
                    card.push_break();
                }
            }
            LineKind::ItemStart { split, .. } => {
                self.flush();
                self.current = Some(CardBuilder::from_split(split));
            }
            LineKind::Continuation { content } => match self.current.as_mut() {
                Some(card) => card.push_text(content),
                None => self.current = Some(CardBuilder::from_split(resolve(content, self.options))),
            },
        }
    }

    fn flush(&mut self) {
        if let Some(card) = self.current.take() {
            self.records.push(card.build());
        }
    }

    fn finalize(mut self) -> Vec<CardRecord> {
        self.flush();
        self.records
    }
}
