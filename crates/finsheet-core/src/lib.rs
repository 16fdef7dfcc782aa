//! # finsheet-core
//!
//! Core data structures for the finsheet financial spreading grid.
//!
//! This crate provides the model the grid is built on:
//! - [`CellKey`] - `line_item_code|period_id` composite keys
//! - [`ValueStore`], [`HighlightMap`], [`CommentMap`] - sparse per-cell storage
//! - [`format`] - display formatting and input parsing
//! - [`RowDefinition`], [`PeriodDefinition`] - the row and column schema
//! - [`Statement`] - rows × periods with cascading structural mutations
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use finsheet_core::{
//!     CellChange, PeriodDefinition, PeriodType, RowDefinition, Statement, ValueStore,
//! };
//!
//! let ye = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
//! let mut statement = Statement::from_parts(
//!     vec![RowDefinition::data("Asset.Current.Cash", "Cash", 1)],
//!     vec![PeriodDefinition::new("2024-12-31", ye, PeriodType::Year)],
//!     ValueStore::new(),
//! )
//! .unwrap();
//!
//! statement.apply_changes(&[CellChange::new("Asset.Current.Cash", "2024-12-31", None, Some(890_000.0))]);
//! assert_eq!(statement.value("Asset.Current.Cash", "2024-12-31"), Some(890_000.0));
//!
//! // Deleting the row sweeps its values
//! statement.delete_row(0).unwrap();
//! assert!(statement.values().is_empty());
//! ```

pub mod annotation;
pub mod error;
pub mod format;
pub mod key;
pub mod options;
pub mod period;
pub mod row;
pub mod statement;
pub mod store;

// Re-exports for convenience
pub use annotation::{BackgroundHighlight, CellHighlight, CommentMap, FontHighlight, HighlightMap};
pub use error::{Error, Result};
pub use format::{
    format_for_editing, format_number, format_period_date, parse_number, round_to_cents,
    DateFormat, DisplayScale, FormatOptions, NegativeFormat, MAX_DECIMAL_PLACES,
};
pub use key::{CellKey, KEY_DELIMITER};
pub use options::{CommitPolicy, DisplayOptions, GridOptions};
pub use period::{
    audit_active_variants, periods_missing_active_variant,
    periods_with_conflicting_active_variants, ActiveVariantAudit, ColumnSide, InsertMode,
    PeriodDefinition, PeriodType,
};
pub use row::{MoveDirection, RowDefinition, RowSide, RowType};
pub use statement::Statement;
pub use store::{CellChange, CellMap, ValueStore};
