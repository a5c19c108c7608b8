//! Core flashdeck library: turns pasted or OCR-extracted text into cards.
//!
//! Provides:
//! - Free-text parser (bullets, numbered lists, tabs, colons, dashes,
//!   dictionary entries, wrapped definitions)
//! - Validation warnings for incomplete cards
//! - Duplex print layout for sheets of eight cards
//! - Shared types (CardRecord, ParseResult, ParserOptions, etc.)

pub mod classifier;
pub mod error;
pub mod layout;
pub mod normalize;
pub mod parser;
pub mod separator;
pub mod types;
pub mod validate;

pub use error::{LayoutError, Result};
pub use layout::{plan_sheets, DuplexMode, PrintConfig, SheetPlan, CARDS_PER_SHEET};
pub use parser::{parse, parse_with};
pub use types::{
    records_to_tsv, CardRecord, DashPolicy, ParseResult, ParserOptions, Separator, Side,
};
pub use validate::{invalid_rows, live_counts, validate};
