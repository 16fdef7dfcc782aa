//! Error types for finsheet-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a model operation can be refused
///
/// None of these are fatal. The grid layer treats every one of them as a
/// no-op and leaves the statement unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid composite key or key component
    #[error("Invalid cell key: {0}")]
    InvalidKey(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (count: {1})")]
    RowOutOfBounds(usize, usize),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (count: {1})")]
    ColumnOutOfBounds(usize, usize),

    /// Period not found by id
    #[error("Period not found: {0}")]
    PeriodNotFound(String),

    /// Line item code already in use
    #[error("Line item code already exists: {0}")]
    DuplicateLineItem(String),

    /// Period id already in use
    #[error("Period id already exists: {0}")]
    DuplicatePeriod(String),

    /// The only remaining period cannot be removed
    #[error("Cannot remove the last remaining period")]
    LastPeriod,

    /// The statement has no periods to extend from
    #[error("Statement has no periods")]
    NoPeriods,

    /// Structural rows (subtotal, total, header, spacer) cannot be deleted
    #[error("Row {0} is a structural row and cannot be deleted")]
    StructuralRow(String),

    /// User supplied label was empty or whitespace
    #[error("Label cannot be empty")]
    EmptyLabel,

    /// Date arithmetic produced no valid calendar date
    #[error("Invalid period date: {0}")]
    InvalidDate(String),
}
