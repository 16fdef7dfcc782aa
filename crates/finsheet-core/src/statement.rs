//! Statement - rows, periods and their sparse cell data
//!
//! The statement owns the ordered row and period sequences together with the
//! value, highlight and comment maps, and keeps them consistent: every
//! structural mutation that destroys a row or period sweeps that row's or
//! period's entries out of all maps before it returns.

use std::collections::HashSet;

use log::debug;

use crate::annotation::{CellHighlight, CommentMap, HighlightMap};
use crate::error::{Error, Result};
use crate::key::{validate_key_component, CellKey};
use crate::period::{
    audit_active_variants, next_year_end, ActiveVariantAudit, ColumnSide, InsertMode,
    PeriodDefinition, PeriodType,
};
use crate::row::{MoveDirection, RowDefinition, RowSide};
use crate::store::{CellChange, ValueStore};

/// Prefix of generated line item codes
const ROW_CODE_PREFIX: &str = "ROW_";

/// A financial statement: line items × reporting periods
///
/// Deserializing goes through [`Statement::from_parts`], so duplicate or
/// malformed codes and ids are rejected.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StatementParts"))]
pub struct Statement {
    rows: Vec<RowDefinition>,
    periods: Vec<PeriodDefinition>,
    values: ValueStore,
    highlights: HighlightMap,
    comments: CommentMap,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StatementParts {
    rows: Vec<RowDefinition>,
    periods: Vec<PeriodDefinition>,
    #[serde(default)]
    values: ValueStore,
    #[serde(default)]
    highlights: HighlightMap,
    #[serde(default)]
    comments: CommentMap,
}

#[cfg(feature = "serde")]
impl TryFrom<StatementParts> for Statement {
    type Error = Error;

    fn try_from(parts: StatementParts) -> Result<Self> {
        Ok(Self::from_parts(parts.rows, parts.periods, parts.values)?
            .with_highlights(parts.highlights)
            .with_comments(parts.comments))
    }
}

impl Statement {
    /// Create an empty statement
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a statement from rows, periods and values
    ///
    /// Codes and ids must be unique and must not contain the key delimiter.
    /// Values may reference rows or periods that do not exist; they are kept
    /// but never displayed. A generated code or id sweeps such orphans before
    /// it is used, so new rows and periods always start empty.
    pub fn from_parts(
        rows: Vec<RowDefinition>,
        periods: Vec<PeriodDefinition>,
        values: ValueStore,
    ) -> Result<Self> {
        let mut statement = Self::new();
        for row in rows {
            statement.push_row(row)?;
        }
        for period in periods {
            statement.push_period(period)?;
        }
        statement.values = values;
        Ok(statement)
    }

    /// Replace the highlight map
    pub fn with_highlights(mut self, highlights: HighlightMap) -> Self {
        self.highlights = highlights;
        self
    }

    /// Replace the comment map
    pub fn with_comments(mut self, comments: CommentMap) -> Self {
        self.comments = comments;
        self
    }

    // ==================== Accessors ====================

    /// Rows in display order
    pub fn rows(&self) -> &[RowDefinition] {
        &self.rows
    }

    /// Periods in display order
    pub fn periods(&self) -> &[PeriodDefinition] {
        &self.periods
    }

    /// Value map
    pub fn values(&self) -> &ValueStore {
        &self.values
    }

    /// Highlight map
    pub fn highlights(&self) -> &HighlightMap {
        &self.highlights
    }

    /// Comment map
    pub fn comments(&self) -> &CommentMap {
        &self.comments
    }

    /// Get a row by index
    pub fn row(&self, index: usize) -> Option<&RowDefinition> {
        self.rows.get(index)
    }

    /// Get a period by index
    pub fn period(&self, index: usize) -> Option<&PeriodDefinition> {
        self.periods.get(index)
    }

    /// Get a period by id
    pub fn period_by_id(&self, period_id: &str) -> Option<&PeriodDefinition> {
        self.periods.iter().find(|p| p.period_id == period_id)
    }

    /// Index of a row by code
    pub fn row_index(&self, line_item_code: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.line_item_code == line_item_code)
    }

    /// Index of a period by id
    pub fn period_index(&self, period_id: &str) -> Option<usize> {
        self.periods.iter().position(|p| p.period_id == period_id)
    }

    /// Stored value for a row and period
    pub fn value(&self, line_item_code: &str, period_id: &str) -> Option<f64> {
        self.values.value(line_item_code, period_id)
    }

    // ==================== Loading ====================

    /// Append a row
    pub fn push_row(&mut self, row: RowDefinition) -> Result<()> {
        validate_key_component(&row.line_item_code)?;
        if self.row_index(&row.line_item_code).is_some() {
            return Err(Error::DuplicateLineItem(row.line_item_code));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append a period
    pub fn push_period(&mut self, period: PeriodDefinition) -> Result<()> {
        validate_key_component(&period.period_id)?;
        if self.period_index(&period.period_id).is_some() {
            return Err(Error::DuplicatePeriod(period.period_id));
        }
        self.periods.push(period);
        Ok(())
    }

    // ==================== Cell data ====================

    /// Apply one commit's worth of value changes
    pub fn apply_changes(&mut self, changes: &[CellChange]) {
        self.values.apply_changes(changes);
    }

    /// Set or clear a cell highlight; all-default removes the entry
    pub fn set_highlight(&mut self, key: CellKey, highlight: CellHighlight) -> Option<CellHighlight> {
        self.highlights.set_highlight(key, highlight)
    }

    /// Set or clear a cell comment; blank text removes the entry
    pub fn set_comment(&mut self, key: CellKey, text: &str) -> Option<String> {
        self.comments.set_comment(key, text)
    }

    // ==================== Periods ====================

    /// Append a yearly period one year after the last period
    ///
    /// Returns the new period id.
    pub fn add_period(&mut self) -> Result<String> {
        let last = self.periods.last().ok_or(Error::NoPeriods)?;
        let period_end = next_year_end(last.period_end)?;
        let period_id = self.generate_period_id(&period_end.to_string());
        self.sweep_period(&period_id);
        self.periods.push(PeriodDefinition::new(
            period_id.clone(),
            period_end,
            PeriodType::Year,
        ));
        debug!("added period {} ending {}", period_id, period_end);
        Ok(period_id)
    }

    /// Drop the trailing period
    ///
    /// Refused when only one period remains.
    pub fn remove_period(&mut self) -> Result<PeriodDefinition> {
        if self.periods.len() <= 1 {
            return Err(Error::LastPeriod);
        }
        let id = match self.periods.last() {
            Some(period) => period.period_id.clone(),
            None => return Err(Error::NoPeriods),
        };
        self.delete_period(&id)
    }

    /// Delete a period and every entry keyed to it
    ///
    /// Refused when it is the last remaining period.
    pub fn delete_period(&mut self, period_id: &str) -> Result<PeriodDefinition> {
        let index = self
            .period_index(period_id)
            .ok_or_else(|| Error::PeriodNotFound(period_id.to_string()))?;
        if self.periods.len() <= 1 {
            return Err(Error::LastPeriod);
        }

        let period = self.periods.remove(index);
        let swept = self.sweep_period(period_id);
        debug!("deleted period {} ({} entries swept)", period_id, swept);
        Ok(period)
    }

    /// Remove every value of a period, keeping the period itself
    ///
    /// Highlights and comments are kept. Returns the number of values removed.
    pub fn clear_period(&mut self, period_id: &str) -> Result<usize> {
        if self.period_index(period_id).is_none() {
            return Err(Error::PeriodNotFound(period_id.to_string()));
        }
        let removed = self.values.remove_period(period_id);
        debug!("cleared period {} ({} values)", period_id, removed);
        Ok(removed)
    }

    /// Insert a variant of the period at `at_index`
    ///
    /// The new period shares the reference period's date and type, carries
    /// the trimmed `variant` label and starts inactive. With
    /// [`InsertMode::Clone`] every value of the reference period is copied.
    /// Returns the new period id.
    pub fn insert_column(
        &mut self,
        at_index: usize,
        side: ColumnSide,
        mode: InsertMode,
        variant: &str,
    ) -> Result<String> {
        let variant = variant.trim();
        if variant.is_empty() {
            return Err(Error::EmptyLabel);
        }
        let reference = self
            .periods
            .get(at_index)
            .ok_or(Error::ColumnOutOfBounds(at_index, self.periods.len()))?;

        let reference_id = reference.period_id.clone();
        let period_id = self.generate_period_id(&reference.period_end.to_string());
        let period = PeriodDefinition::new(period_id.clone(), reference.period_end, reference.period_type)
            .with_variant(variant)
            .with_active(false);

        let insert_at = match side {
            ColumnSide::Left => at_index,
            ColumnSide::Right => at_index + 1,
        };
        self.sweep_period(&period_id);
        self.periods.insert(insert_at, period);

        let copied = match mode {
            InsertMode::Clone => self.values.copy_period(&reference_id, &period_id),
            InsertMode::Blank => 0,
        };
        debug!(
            "inserted column {} at {} from {} ({:?}, {} values copied)",
            period_id, insert_at, reference_id, mode, copied
        );
        Ok(period_id)
    }

    /// Flip a period's active flag, returning the new state
    pub fn toggle_active(&mut self, period_id: &str) -> Result<bool> {
        let period = self.period_mut(period_id)?;
        period.is_active = !period.is_active;
        debug!("period {} active = {}", period_id, period.is_active);
        Ok(period.is_active)
    }

    /// Set a period's included flag
    pub fn set_included(&mut self, period_id: &str, included: bool) -> Result<()> {
        let period = self.period_mut(period_id)?;
        period.is_included = included;
        debug!("period {} included = {}", period_id, included);
        Ok(())
    }

    /// Audit active variants across all periods
    pub fn audit(&self) -> ActiveVariantAudit {
        audit_active_variants(&self.periods)
    }

    fn period_mut(&mut self, period_id: &str) -> Result<&mut PeriodDefinition> {
        self.periods
            .iter_mut()
            .find(|p| p.period_id == period_id)
            .ok_or_else(|| Error::PeriodNotFound(period_id.to_string()))
    }

    // ==================== Rows ====================

    /// Insert an editable data row next to the row at `at_index`
    ///
    /// On an empty statement `at_index` 0 is accepted. Returns the generated
    /// line item code.
    pub fn insert_row(&mut self, at_index: usize, side: RowSide, label: &str) -> Result<String> {
        let label = label.trim();
        if label.is_empty() {
            return Err(Error::EmptyLabel);
        }
        if at_index >= self.rows.len() && !(self.rows.is_empty() && at_index == 0) {
            return Err(Error::RowOutOfBounds(at_index, self.rows.len()));
        }

        let code = self.generate_line_item_code();
        self.sweep_line_item(&code);
        let insert_at = match side {
            RowSide::Above => at_index,
            RowSide::Below => (at_index + 1).min(self.rows.len()),
        };
        self.rows
            .insert(insert_at, RowDefinition::data(code.clone(), label, 1));
        debug!("inserted row {} ({:?}) at {}", code, label, insert_at);
        Ok(code)
    }

    /// Delete a data row and every entry keyed to it
    ///
    /// Structural rows are refused.
    pub fn delete_row(&mut self, at_index: usize) -> Result<RowDefinition> {
        let row = self
            .rows
            .get(at_index)
            .ok_or(Error::RowOutOfBounds(at_index, self.rows.len()))?;
        if row.row_type.is_structural() {
            return Err(Error::StructuralRow(row.line_item_code.clone()));
        }

        let row = self.rows.remove(at_index);
        let code = row.line_item_code.as_str();
        let swept = self.sweep_line_item(code);
        debug!("deleted row {} ({} entries swept)", code, swept);
        Ok(row)
    }

    /// Swap a row with its neighbour
    ///
    /// Returns the row's new index, or `None` at the boundary.
    pub fn move_row(&mut self, index: usize, direction: MoveDirection) -> Result<Option<usize>> {
        if index >= self.rows.len() {
            return Err(Error::RowOutOfBounds(index, self.rows.len()));
        }
        let target = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|&t| t < self.rows.len()),
        };
        if let Some(target) = target {
            self.rows.swap(index, target);
            debug!("moved row {} -> {}", index, target);
        }
        Ok(target)
    }

    // ==================== Identity ====================

    /// Drop every value, highlight and comment keyed to a period id
    fn sweep_period(&mut self, period_id: &str) -> usize {
        self.values.remove_period(period_id)
            + self.highlights.remove_period(period_id)
            + self.comments.remove_period(period_id)
    }

    /// Drop every value, highlight and comment keyed to a line item code
    fn sweep_line_item(&mut self, code: &str) -> usize {
        self.values.remove_line_item(code)
            + self.highlights.remove_line_item(code)
            + self.comments.remove_line_item(code)
    }

    /// Generate a line item code not used by any row
    fn generate_line_item_code(&self) -> String {
        let used: HashSet<&str> = self.rows.iter().map(|r| r.line_item_code.as_str()).collect();
        let mut n = self.rows.len() + 1;
        loop {
            let code = format!("{}{}", ROW_CODE_PREFIX, n);
            if !used.contains(code.as_str()) {
                return code;
            }
            n += 1;
        }
    }

    /// Generate a period id from a date: the date itself, else `<date>-v<n>`
    fn generate_period_id(&self, date: &str) -> String {
        if self.period_index(date).is_none() {
            return date.to_string();
        }
        let mut n = 2;
        loop {
            let id = format!("{}-v{}", date, n);
            if self.period_index(&id).is_none() {
                return id;
            }
            n += 1;
        }
    }
}
