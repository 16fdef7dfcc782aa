//! Commands accepted by [`Grid::dispatch`](crate::Grid::dispatch)
//!
//! Column indices are visible columns: hidden period dates are skipped.

use chrono::NaiveDate;
use finsheet_core::{
    BackgroundHighlight, ColumnSide, Error, FontHighlight, InsertMode, MoveDirection, RowSide,
};

use crate::nav::{CellPosition, KeyInput};

/// A user action on the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCommand {
    // Navigation and editing
    Key(KeyInput),
    /// Single click
    Focus(CellPosition),
    /// Double click
    BeginEdit(CellPosition),
    /// Replace the edit buffer
    EditText(String),
    Blur,

    // Rows
    InsertRow { row: usize, side: RowSide },
    DeleteRow { row: usize },
    MoveRow { row: usize, direction: MoveDirection },

    // Periods
    AddPeriod,
    RemovePeriod,
    InsertColumn { col: usize, side: ColumnSide, mode: InsertMode },
    DeletePeriod { col: usize },
    ClearPeriod { col: usize },
    ToggleActive { col: usize },
    SetIncluded { col: usize, included: bool },

    // Cell annotations
    ToggleFont { cell: CellPosition, font: FontHighlight },
    ToggleBackground { cell: CellPosition, background: BackgroundHighlight },
    ToggleBoldBorder { cell: CellPosition },
    ClearFormatting { cell: CellPosition },
    EditComment { cell: CellPosition },
    RemoveComment { cell: CellPosition },

    // Visibility
    HidePeriodEnd(NaiveDate),
    ShowPeriodEnd(NaiveDate),
}

impl GridCommand {
    /// Commands that change rows or periods
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            GridCommand::InsertRow { .. }
                | GridCommand::DeleteRow { .. }
                | GridCommand::MoveRow { .. }
                | GridCommand::AddPeriod
                | GridCommand::RemovePeriod
                | GridCommand::InsertColumn { .. }
                | GridCommand::DeletePeriod { .. }
                | GridCommand::ClearPeriod { .. }
                | GridCommand::HidePeriodEnd(_)
                | GridCommand::ShowPeriodEnd(_)
        )
    }
}

/// Outcome of a dispatched command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// State or data changed
    Applied,
    /// Nothing to do
    Unchanged,
    /// The user declined a confirmation or cancelled a prompt
    Cancelled,
    /// The statement refused the mutation
    Refused(Error),
}

impl Dispatch {
    pub fn is_applied(&self) -> bool {
        matches!(self, Dispatch::Applied)
    }
}
