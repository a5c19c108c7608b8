//! Error types for flashdeck-core.

use thiserror::Error;

use crate::types::Side;

/// Result type alias using LayoutError.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors in a print configuration. Text parsing itself never fails.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("{side:?} font size {size}pt is outside {min}-{max}pt")]
    FontSize {
        side: Side,
        size: u32,
        min: u32,
        max: u32,
    },

    #[error("unknown footer placeholder {{{name}}}")]
    UnknownPlaceholder { name: String },

    #[error("unclosed '{{' in footer template at position {position}")]
    UnclosedPlaceholder { position: usize },

    #[error("unmatched '}}' in footer template at position {position}")]
    UnmatchedBrace { position: usize },
}
