//! Validation of parsed or edited card records.

use crate::layout::CARDS_PER_SHEET;
use crate::types::CardRecord;

/// One warning per record with an empty side, citing 1-based row numbers.
pub fn validate(records: &[CardRecord]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| {
            record
                .empty_side()
                .map(|side| format!("Row {} has an empty {} field.", idx + 1, side.as_str()))
        })
        .collect()
}

/// 0-based indices of records that need attention.
pub fn invalid_rows(records: &[CardRecord]) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.empty_side().is_some())
        .map(|(idx, _)| idx)
        .collect()
}

/// Number of cards and printed sheets.
pub fn live_counts(records: &[CardRecord]) -> (usize, usize) {
    let cards = records.len();
    (cards, cards.div_ceil(CARDS_PER_SHEET))
}
