//! # finsheet
//!
//! A financial spreading grid: accounting line items (rows) against
//! reporting periods (columns).
//!
//! ## Features
//!
//! - Sparse value, highlight and comment storage keyed by `line_item_code|period_id`
//! - Accounting number formatting (parentheses, scales, grouping)
//! - Keyboard navigation that skips headers, subtotals and totals
//! - Row and column insertion, deletion and reordering with cascading cleanup
//! - Period variants with an active-variant audit
//! - CSV import of values and CSV export of the rendered grid (`csv` feature)
//!
//! ## Example
//!
//! ```rust
//! use finsheet::prelude::*;
//!
//! let mut grid = Grid::new(finsheet::sample::balance_sheet(), AutoConfirm::new(), Vec::new());
//!
//! // Enter the grid and type over the first cash figure
//! grid.dispatch(GridCommand::Key(KeyInput::new(Key::Enter)));
//! grid.dispatch(GridCommand::Key(KeyInput::new(Key::F2)));
//! grid.dispatch(GridCommand::EditText("650,000".to_string()));
//! grid.dispatch(GridCommand::Key(KeyInput::new(Key::Enter)));
//!
//! assert_eq!(grid.statement().value("Asset.Current.Cash", "2022-12-31"), Some(650_000.0));
//! assert_eq!(grid.observer().len(), 1);
//!
//! let rendered = grid.render();
//! assert_eq!(rendered.rows[1].cells[0].text, "650,000");
//! ```

pub mod prelude;
pub mod sample;

// Re-export core types
pub use finsheet_core::{
    audit_active_variants, format_for_editing, format_number, format_period_date, parse_number,
    periods_missing_active_variant, periods_with_conflicting_active_variants, round_to_cents,
    ActiveVariantAudit, BackgroundHighlight, CellChange, CellHighlight, CellKey, CellMap,
    ColumnSide, CommentMap, CommitPolicy, DateFormat, DisplayOptions, DisplayScale, Error,
    FontHighlight, FormatOptions, GridOptions, HighlightMap, InsertMode, MoveDirection,
    NegativeFormat, PeriodDefinition, PeriodType, Result, RowDefinition, RowSide, RowType,
    Statement, ValueStore, KEY_DELIMITER, MAX_DECIMAL_PLACES,
};

// Re-export grid types
pub use finsheet_grid::{
    period_numbers, row_numbers, AutoConfirm, CellPosition, Dialogs, Dispatch, Grid, GridCommand,
    GridObserver, InteractionState, Key, KeyInput, MenuEntry, MenuItem, NavMode, Notification,
    RenderedCell, RenderedColumn, RenderedGrid, RenderedRow, ScriptedDialogs,
};

// Re-export CSV types
#[cfg(feature = "csv")]
pub use finsheet_csv::{
    CsvDialect, CsvError, CsvReadOptions, CsvReader, CsvResult, CsvWriteOptions, CsvWriter,
    LineTerminator, ValueField,
};
