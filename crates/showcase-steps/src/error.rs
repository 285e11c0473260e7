//! Errors raised while parsing demo inputs.

use thiserror::Error;

/// Result type for input parsing.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while turning a raw demo input into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Dial token that does not start with `L` or `R`
    #[error("invalid direction in token {token:?}")]
    InvalidDirection { token: String },

    /// Token whose numeric part is not a non-negative integer
    #[error("invalid number in token {token:?}")]
    InvalidNumber { token: String },

    /// Range that is not written as `low-high` with `low <= high`
    #[error("invalid range {token:?}, expected `low-high` with low <= high")]
    InvalidRange { token: String },

    /// Grid cell outside `.`, `@` and `x`
    #[error("invalid grid cell {cell:?} at row {row}, column {col}")]
    InvalidCell { cell: char, row: usize, col: usize },

    /// Grid row whose width differs from the first row
    #[error("grid row {row} has width {width}, expected {expected}")]
    RaggedGrid {
        row: usize,
        width: usize,
        expected: usize,
    },

    /// Digit bank containing something other than `0`-`9`
    #[error("invalid digit {ch:?} at position {index}")]
    InvalidDigit { ch: char, index: usize },
}
