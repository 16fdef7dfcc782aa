//! Prelude module - common imports for finsheet users
//!
//! ```rust
//! use finsheet::prelude::*;
//! ```

pub use crate::{
    // Model types
    CellChange,
    CellHighlight,
    CellKey,
    ColumnSide,
    // Error types
    Error,
    FontHighlight,
    BackgroundHighlight,
    GridOptions,
    InsertMode,
    MoveDirection,
    PeriodDefinition,
    PeriodType,
    Result,
    RowDefinition,
    RowSide,
    RowType,
    Statement,
    ValueStore,

    // Grid types
    AutoConfirm,
    CellPosition,
    Dialogs,
    Dispatch,
    Grid,
    GridCommand,
    GridObserver,
    Key,
    KeyInput,
    Notification,
    ScriptedDialogs,
};

#[cfg(feature = "csv")]
pub use crate::{CsvReader, CsvWriter};
