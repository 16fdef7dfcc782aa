//! The grid orchestrator
//!
//! [`Grid`] ties the statement, the interaction state, the display options
//! and the set of hidden period dates together. Everything the user does
//! arrives as a [`GridCommand`]; the outcome is reported as a [`Dispatch`]
//! and every data change is announced to the [`GridObserver`].
//!
//! Rules enforced here rather than in the statement:
//! - destructive actions ask [`Dialogs::confirm`] first
//! - free text comes from [`Dialogs::prompt_text`]; cancelled or blank text aborts
//! - one commit produces exactly one [`Notification::CellsChanged`]
//! - a commit that would store the value already stored is dropped
//! - a structural command first commits the edit in progress; focus is
//!   clamped once the mutation is applied

use std::collections::BTreeSet;
use std::slice;

use chrono::NaiveDate;
use finsheet_core::{
    round_to_cents, ActiveVariantAudit, CellChange, CellHighlight, CellKey, ColumnSide, Error,
    GridOptions, InsertMode, MoveDirection, PeriodDefinition, Result, RowSide, Statement,
};
use log::{debug, trace};

use crate::command::{Dispatch, GridCommand};
use crate::dialogs::{AutoConfirm, Dialogs};
use crate::nav::{CellPosition, CommitRequest, InteractionState, NavContext};
use crate::numbering::{period_numbers, row_numbers};
use crate::observer::{GridObserver, Notification};

/// Default label offered when inserting a row
pub const DEFAULT_ROW_LABEL: &str = "New Line Item";
/// Default label offered when inserting a variant column
pub const DEFAULT_VARIANT_LABEL: &str = "Pro Forma";

/// The statement as seen through the visible columns
pub(crate) struct GridView<'a> {
    statement: &'a Statement,
    columns: Vec<usize>,
}

impl<'a> GridView<'a> {
    pub(crate) fn new(statement: &'a Statement, hidden: &BTreeSet<NaiveDate>) -> Self {
        let columns = statement
            .periods()
            .iter()
            .enumerate()
            .filter(|(_, p)| !hidden.contains(&p.period_end))
            .map(|(i, _)| i)
            .collect();
        Self { statement, columns }
    }

    pub(crate) fn period(&self, col: usize) -> Option<&'a PeriodDefinition> {
        let statement = self.statement;
        self.columns.get(col).and_then(|&i| statement.period(i))
    }

    pub(crate) fn periods(&self) -> impl Iterator<Item = &'a PeriodDefinition> + '_ {
        let statement = self.statement;
        self.columns.iter().filter_map(move |&i| statement.period(i))
    }

    /// Key of a cell on a row that shows cells
    pub(crate) fn cell_key(&self, position: CellPosition) -> Option<CellKey> {
        let row = self.statement.row(position.row)?;
        if !row.row_type.has_cells() {
            return None;
        }
        let period = self.period(position.col)?;
        Some(CellKey::new(&row.line_item_code, &period.period_id))
    }
}

impl NavContext for GridView<'_> {
    fn row_count(&self) -> usize {
        self.statement.rows().len()
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn has_cells(&self, row: usize) -> bool {
        self.statement
            .row(row)
            .map_or(false, |r| r.row_type.has_cells())
    }

    fn is_navigable(&self, row: usize) -> bool {
        self.statement.row(row).map_or(false, |r| r.is_navigable())
    }

    fn is_editable(&self, row: usize) -> bool {
        self.statement
            .row(row)
            .map_or(false, |r| r.is_editable && r.row_type.has_cells())
    }

    fn value_at(&self, position: CellPosition) -> Option<f64> {
        let key = self.cell_key(position)?;
        self.statement.values().get_by_key(&key).copied()
    }
}

/// An interactive financial grid
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use finsheet_core::{PeriodDefinition, PeriodType, RowDefinition, Statement, ValueStore};
/// use finsheet_grid::{AutoConfirm, CellPosition, Grid, GridCommand, Key, KeyInput, Notification};
///
/// let ye = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
/// let statement = Statement::from_parts(
///     vec![RowDefinition::data("Cash", "Cash", 1)],
///     vec![PeriodDefinition::new("2024-12-31", ye, PeriodType::Year)],
///     ValueStore::new(),
/// )
/// .unwrap();
///
/// let mut grid = Grid::new(statement, AutoConfirm::new(), Vec::new());
/// grid.dispatch(GridCommand::Focus(CellPosition::new(0, 0)));
/// grid.dispatch(GridCommand::Key(KeyInput::new(Key::F2)));
/// grid.dispatch(GridCommand::EditText("(1,500)".to_string()));
/// grid.dispatch(GridCommand::Key(KeyInput::new(Key::Enter)));
///
/// assert_eq!(grid.statement().value("Cash", "2024-12-31"), Some(-1500.0));
/// assert!(matches!(grid.observer()[0], Notification::CellsChanged(_)));
/// ```
#[derive(Debug)]
pub struct Grid<D = AutoConfirm, O = Vec<Notification>> {
    statement: Statement,
    options: GridOptions,
    state: InteractionState,
    hidden_period_ends: BTreeSet<NaiveDate>,
    dialogs: D,
    observer: O,
}

impl<D, O> Grid<D, O> {
    /// Create a grid with default options and nothing focused
    pub fn new(statement: Statement, dialogs: D, observer: O) -> Self {
        Self {
            statement,
            options: GridOptions::default(),
            state: InteractionState::new(),
            hidden_period_ends: BTreeSet::new(),
            dialogs,
            observer,
        }
    }

    /// Set the options
    pub fn with_options(mut self, options: GridOptions) -> Self {
        self.options = options;
        self
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: GridOptions) {
        self.options = options;
    }

    /// Focus and edit state
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn dialogs_mut(&mut self) -> &mut D {
        &mut self.dialogs
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Take the statement back out of the grid
    pub fn into_statement(self) -> Statement {
        self.statement
    }

    /// Period end dates currently hidden
    pub fn hidden_period_ends(&self) -> &BTreeSet<NaiveDate> {
        &self.hidden_period_ends
    }

    pub(crate) fn view(&self) -> GridView<'_> {
        GridView::new(&self.statement, &self.hidden_period_ends)
    }

    /// Periods shown as columns, in order
    pub fn visible_periods(&self) -> Vec<&PeriodDefinition> {
        self.view().periods().collect()
    }

    /// Period shown in a visible column
    pub fn period_at(&self, col: usize) -> Option<&PeriodDefinition> {
        self.view().period(col)
    }

    /// Composite key of a visible cell
    pub fn cell_key(&self, position: CellPosition) -> Option<CellKey> {
        self.view().cell_key(position)
    }

    /// Stored value of a visible cell
    pub fn value_at(&self, position: CellPosition) -> Option<f64> {
        self.view().value_at(position)
    }

    /// Row numbers, 1-based, for numbered rows
    pub fn row_numbers(&self) -> Vec<Option<usize>> {
        row_numbers(self.statement.rows())
    }

    /// Period numbers of the visible columns
    pub fn period_numbers(&self) -> Vec<usize> {
        period_numbers(self.view().periods())
    }

    /// Active-variant audit over all periods, hidden ones included
    pub fn audit(&self) -> ActiveVariantAudit {
        self.statement.audit()
    }

    fn period_id_at(&self, col: usize) -> Result<String> {
        let view = self.view();
        view.period(col)
            .map(|p| p.period_id.clone())
            .ok_or(Error::ColumnOutOfBounds(col, view.column_count()))
    }

    fn period_label(&self, period_id: &str) -> String {
        self.statement
            .period_by_id(period_id)
            .map(|p| p.display_label(self.options.display.date_format))
            .unwrap_or_else(|| period_id.to_string())
    }

    fn annotation_key(&self, cell: CellPosition) -> Result<CellKey> {
        let view = self.view();
        let row = self
            .statement
            .row(cell.row)
            .ok_or(Error::RowOutOfBounds(cell.row, self.statement.rows().len()))?;
        if cell.col >= view.column_count() {
            return Err(Error::ColumnOutOfBounds(cell.col, view.column_count()));
        }
        view.cell_key(cell)
            .ok_or_else(|| Error::StructuralRow(row.line_item_code.clone()))
    }
}

impl<D: Dialogs, O: GridObserver> Grid<D, O> {
    /// Run one command to completion
    pub fn dispatch(&mut self, command: GridCommand) -> Dispatch {
        trace!("dispatch {:?}", command);
        let structural = command.is_structural();
        if structural {
            // Structural edits take focus away from the cell editor
            self.navigate(|state, _| state.blur());
        }
        let outcome = match command {
            GridCommand::Key(input) => self.navigate(|state, view| state.handle_key(input, view)),
            GridCommand::Focus(position) => self.navigate(|state, view| state.focus(position, view)),
            GridCommand::BeginEdit(position) => {
                self.navigate(|state, view| state.begin_edit(position, view))
            }
            GridCommand::EditText(text) => {
                if self.state.set_edit_text(&text) {
                    Dispatch::Applied
                } else {
                    Dispatch::Unchanged
                }
            }
            GridCommand::Blur => self.navigate(|state, _| state.blur()),

            GridCommand::InsertRow { row, side } => self.insert_row(row, side),
            GridCommand::DeleteRow { row } => self.delete_row(row),
            GridCommand::MoveRow { row, direction } => self.move_row(row, direction),

            GridCommand::AddPeriod => self.add_period(),
            GridCommand::RemovePeriod => self.remove_period(),
            GridCommand::InsertColumn { col, side, mode } => self.insert_column(col, side, mode),
            GridCommand::DeletePeriod { col } => self.delete_period(col),
            GridCommand::ClearPeriod { col } => self.clear_period(col),
            GridCommand::ToggleActive { col } => self.toggle_active(col),
            GridCommand::SetIncluded { col, included } => self.set_included(col, included),

            GridCommand::ToggleFont { cell, font } => {
                self.update_highlight(cell, |h| h.toggled_font(font))
            }
            GridCommand::ToggleBackground { cell, background } => {
                self.update_highlight(cell, |h| h.toggled_background(background))
            }
            GridCommand::ToggleBoldBorder { cell } => {
                self.update_highlight(cell, CellHighlight::toggled_bold_border)
            }
            GridCommand::ClearFormatting { cell } => self.clear_formatting(cell),
            GridCommand::EditComment { cell } => self.edit_comment(cell),
            GridCommand::RemoveComment { cell } => self.remove_comment(cell),

            GridCommand::HidePeriodEnd(date) => {
                if self.hidden_period_ends.insert(date) {
                    debug!("hid period end {}", date);
                    Dispatch::Applied
                } else {
                    Dispatch::Unchanged
                }
            }
            GridCommand::ShowPeriodEnd(date) => {
                if self.hidden_period_ends.remove(&date) {
                    debug!("showed period end {}", date);
                    Dispatch::Applied
                } else {
                    Dispatch::Unchanged
                }
            }
        };

        if structural && outcome.is_applied() {
            let view = GridView::new(&self.statement, &self.hidden_period_ends);
            self.state.clamp(&view);
        }
        outcome
    }

    // ==================== Navigation ====================

    fn navigate<F>(&mut self, transition: F) -> Dispatch
    where
        F: FnOnce(&mut InteractionState, &GridView<'_>) -> Option<CommitRequest>,
    {
        let before = self.state.clone();
        let view = GridView::new(&self.statement, &self.hidden_period_ends);
        let commit = transition(&mut self.state, &view);
        let committed = match commit {
            Some(request) => self.commit(request),
            None => false,
        };
        if committed || self.state != before {
            Dispatch::Applied
        } else {
            Dispatch::Unchanged
        }
    }

    /// Write a finished edit; returns false when nothing changed
    fn commit(&mut self, request: CommitRequest) -> bool {
        let view = self.view();
        if !view.is_editable(request.position.row) {
            debug!("commit to read-only {} dropped", request.position);
            return false;
        }
        let Some(key) = view.cell_key(request.position) else {
            debug!("commit to {} has no cell", request.position);
            return false;
        };

        let mut value = request.value;
        if self.options.commit.round_to_cents {
            value = value.map(round_to_cents);
        }
        let old_value = self.statement.values().get_by_key(&key).copied();
        if old_value == value {
            trace!("commit to {} unchanged", key);
            return false;
        }

        let change = CellChange::new(key.line_item_code(), key.period_id(), old_value, value);
        self.statement.apply_changes(slice::from_ref(&change));
        debug!("commit {}: {:?} -> {:?}", key, old_value, value);
        self.observer.notify(&Notification::CellsChanged(vec![change]));
        true
    }

    // ==================== Rows ====================

    fn insert_row(&mut self, row: usize, side: RowSide) -> Dispatch {
        let len = self.statement.rows().len();
        if row >= len && !(len == 0 && row == 0) {
            return refused("insert row", Error::RowOutOfBounds(row, len));
        }
        let Some(label) = self.prompt("Enter row label:", DEFAULT_ROW_LABEL) else {
            return Dispatch::Cancelled;
        };
        match self.statement.insert_row(row, side, &label) {
            Ok(line_item_code) => {
                let index = self.statement.row_index(&line_item_code).unwrap_or(row);
                self.observer.notify(&Notification::RowInserted {
                    index,
                    line_item_code,
                });
                Dispatch::Applied
            }
            Err(e) => refused("insert row", e),
        }
    }

    fn delete_row(&mut self, row: usize) -> Dispatch {
        let (label, code, structural) = match self.statement.row(row) {
            Some(r) => (
                r.label.clone(),
                r.line_item_code.clone(),
                r.row_type.is_structural(),
            ),
            None => {
                return refused(
                    "delete row",
                    Error::RowOutOfBounds(row, self.statement.rows().len()),
                )
            }
        };
        if structural {
            return refused("delete row", Error::StructuralRow(code));
        }
        if !self.dialogs.confirm(&format!("Delete \"{}\"?", label)) {
            return Dispatch::Cancelled;
        }
        match self.statement.delete_row(row) {
            Ok(deleted) => {
                self.observer.notify(&Notification::RowDeleted {
                    index: row,
                    line_item_code: deleted.line_item_code,
                });
                Dispatch::Applied
            }
            Err(e) => refused("delete row", e),
        }
    }

    fn move_row(&mut self, row: usize, direction: MoveDirection) -> Dispatch {
        match self.statement.move_row(row, direction) {
            Ok(Some(to)) => {
                let line_item_code = self
                    .statement
                    .row(to)
                    .map(|r| r.line_item_code.clone())
                    .unwrap_or_default();
                self.observer.notify(&Notification::RowMoved {
                    line_item_code,
                    from: row,
                    to,
                });
                Dispatch::Applied
            }
            Ok(None) => Dispatch::Unchanged,
            Err(e) => refused("move row", e),
        }
    }

    // ==================== Periods ====================

    fn add_period(&mut self) -> Dispatch {
        match self.statement.add_period() {
            Ok(period_id) => {
                if let Some(period_end) = self.statement.period_by_id(&period_id).map(|p| p.period_end) {
                    self.observer.notify(&Notification::PeriodAdded {
                        period_id,
                        period_end,
                    });
                }
                Dispatch::Applied
            }
            Err(e) => refused("add period", e),
        }
    }

    fn remove_period(&mut self) -> Dispatch {
        let periods = self.statement.periods();
        if periods.len() <= 1 {
            return refused("remove period", Error::LastPeriod);
        }
        let label = match periods.last() {
            Some(last) => self.period_label(&last.period_id),
            None => return refused("remove period", Error::NoPeriods),
        };
        if !self.dialogs.confirm(&format!("Remove {}?", label)) {
            return Dispatch::Cancelled;
        }
        match self.statement.remove_period() {
            Ok(removed) => {
                self.observer.notify(&Notification::PeriodDeleted {
                    period_id: removed.period_id,
                });
                Dispatch::Applied
            }
            Err(e) => refused("remove period", e),
        }
    }

    fn insert_column(&mut self, col: usize, side: ColumnSide, mode: InsertMode) -> Dispatch {
        let reference_id = match self.period_id_at(col) {
            Ok(id) => id,
            Err(e) => return refused("insert column", e),
        };
        let Some(at_index) = self.statement.period_index(&reference_id) else {
            return refused("insert column", Error::PeriodNotFound(reference_id));
        };
        let Some(variant) = self.prompt("Enter variant label:", DEFAULT_VARIANT_LABEL) else {
            return Dispatch::Cancelled;
        };
        match self.statement.insert_column(at_index, side, mode, &variant) {
            Ok(period_id) => {
                self.observer.notify(&Notification::ColumnInserted {
                    period_id,
                    reference_id,
                    mode,
                });
                Dispatch::Applied
            }
            Err(e) => refused("insert column", e),
        }
    }

    fn delete_period(&mut self, col: usize) -> Dispatch {
        let period_id = match self.period_id_at(col) {
            Ok(id) => id,
            Err(e) => return refused("delete period", e),
        };
        if self.statement.periods().len() <= 1 {
            return refused("delete period", Error::LastPeriod);
        }
        let label = self.period_label(&period_id);
        if !self.dialogs.confirm(&format!("Delete {}?", label)) {
            return Dispatch::Cancelled;
        }
        match self.statement.delete_period(&period_id) {
            Ok(_) => {
                self.observer
                    .notify(&Notification::PeriodDeleted { period_id });
                Dispatch::Applied
            }
            Err(e) => refused("delete period", e),
        }
    }

    fn clear_period(&mut self, col: usize) -> Dispatch {
        let period_id = match self.period_id_at(col) {
            Ok(id) => id,
            Err(e) => return refused("clear period", e),
        };
        let label = self.period_label(&period_id);
        if !self
            .dialogs
            .confirm(&format!("Clear all values in {}?", label))
        {
            return Dispatch::Cancelled;
        }
        match self.statement.clear_period(&period_id) {
            Ok(values_removed) => {
                self.observer.notify(&Notification::PeriodCleared {
                    period_id,
                    values_removed,
                });
                Dispatch::Applied
            }
            Err(e) => refused("clear period", e),
        }
    }

    fn toggle_active(&mut self, col: usize) -> Dispatch {
        let result = self
            .period_id_at(col)
            .and_then(|id| self.statement.toggle_active(&id).map(|active| (id, active)));
        match result {
            Ok((period_id, is_active)) => {
                self.observer.notify(&Notification::ActiveToggled {
                    period_id,
                    is_active,
                });
                Dispatch::Applied
            }
            Err(e) => refused("toggle active", e),
        }
    }

    fn set_included(&mut self, col: usize, included: bool) -> Dispatch {
        let period_id = match self.period_id_at(col) {
            Ok(id) => id,
            Err(e) => return refused("set included", e),
        };
        if self
            .statement
            .period_by_id(&period_id)
            .map_or(false, |p| p.is_included == included)
        {
            return Dispatch::Unchanged;
        }
        match self.statement.set_included(&period_id, included) {
            Ok(()) => {
                self.observer.notify(&Notification::InclusionChanged {
                    period_id,
                    is_included: included,
                });
                Dispatch::Applied
            }
            Err(e) => refused("set included", e),
        }
    }

    // ==================== Annotations ====================

    fn update_highlight<F>(&mut self, cell: CellPosition, update: F) -> Dispatch
    where
        F: FnOnce(CellHighlight) -> CellHighlight,
    {
        let key = match self.annotation_key(cell) {
            Ok(key) => key,
            Err(e) => return refused("highlight", e),
        };
        let current = self.statement.highlights().highlight_or_default(&key);
        let highlight = self.statement.set_highlight(key.clone(), update(current));
        self.observer
            .notify(&Notification::HighlightChanged { key, highlight });
        Dispatch::Applied
    }

    fn clear_formatting(&mut self, cell: CellPosition) -> Dispatch {
        let key = match self.annotation_key(cell) {
            Ok(key) => key,
            Err(e) => return refused("clear formatting", e),
        };
        if !self.statement.highlights().contains(&key) {
            return Dispatch::Unchanged;
        }
        self.statement.set_highlight(key.clone(), CellHighlight::default());
        self.observer.notify(&Notification::HighlightChanged {
            key,
            highlight: None,
        });
        Dispatch::Applied
    }

    fn edit_comment(&mut self, cell: CellPosition) -> Dispatch {
        let key = match self.annotation_key(cell) {
            Ok(key) => key,
            Err(e) => return refused("edit comment", e),
        };
        let existing = self.statement.comments().get_by_key(&key).cloned();
        let default = existing.as_deref().unwrap_or("");
        let Some(text) = self.dialogs.prompt_text("Enter comment:", default) else {
            return Dispatch::Cancelled;
        };
        let comment = self.statement.set_comment(key.clone(), &text);
        if comment == existing {
            return Dispatch::Unchanged;
        }
        self.observer
            .notify(&Notification::CommentChanged { key, comment });
        Dispatch::Applied
    }

    fn remove_comment(&mut self, cell: CellPosition) -> Dispatch {
        let key = match self.annotation_key(cell) {
            Ok(key) => key,
            Err(e) => return refused("remove comment", e),
        };
        if !self.statement.comments().contains(&key) {
            return Dispatch::Unchanged;
        }
        self.statement.set_comment(key.clone(), "");
        self.observer.notify(&Notification::CommentChanged {
            key,
            comment: None,
        });
        Dispatch::Applied
    }

    /// Ask for a label; cancelled and blank answers are both `None`
    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        let answer = self.dialogs.prompt_text(message, default)?;
        let trimmed = answer.trim();
        if trimmed.is_empty() {
            debug!("{} left blank", message);
            return None;
        }
        Some(trimmed.to_string())
    }
}

fn refused(action: &str, error: Error) -> Dispatch {
    debug!("{} refused: {}", action, error);
    Dispatch::Refused(error)
}
