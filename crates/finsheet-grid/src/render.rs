//! Rendering the grid to a display matrix
//!
//! [`RenderedGrid`] is what a view layer draws: header columns for the
//! visible periods and one row per line item with formatted cell text.

use finsheet_core::{format_number, format_period_date, CellHighlight, RowType};

use crate::grid::Grid;
use crate::nav::{CellPosition, NavContext};

/// A visible period column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedColumn {
    pub period_id: String,
    /// Period number; variants of one date share it
    pub number: usize,
    /// Formatted period end date
    pub date_label: String,
    pub variant: Option<String>,
    pub is_active: bool,
    pub is_included: bool,
}

impl RenderedColumn {
    /// Date label followed by the variant in parentheses
    pub fn label(&self) -> String {
        match &self.variant {
            Some(variant) => format!("{} ({})", self.date_label, variant),
            None => self.date_label.clone(),
        }
    }

    /// `Active` or `Inactive`
    pub fn status(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// One displayed cell
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCell {
    /// Formatted value, or the edit buffer while editing
    pub text: String,
    pub value: Option<f64>,
    pub focused: bool,
    pub editing: bool,
    pub read_only: bool,
    /// Stored value is below zero
    pub negative: bool,
    pub highlight: Option<CellHighlight>,
    pub comment: Option<String>,
}

/// One line item
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub line_item_code: String,
    pub number: Option<usize>,
    pub label: String,
    pub indent_level: u32,
    pub row_type: RowType,
    /// Empty for section headers and spacers
    pub cells: Vec<RenderedCell>,
}

/// The whole display matrix
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedGrid {
    pub columns: Vec<RenderedColumn>,
    pub rows: Vec<RenderedRow>,
}

impl RenderedGrid {
    /// Cell at a position, if the row shows cells
    pub fn cell(&self, position: CellPosition) -> Option<&RenderedCell> {
        self.rows.get(position.row)?.cells.get(position.col)
    }

    /// Text of every cell, row by row; rows without cells are empty
    pub fn texts(&self) -> Vec<Vec<&str>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(|c| c.text.as_str()).collect())
            .collect()
    }
}

impl<D, O> Grid<D, O> {
    /// Build the display matrix from the current state
    pub fn render(&self) -> RenderedGrid {
        let view = self.view();
        let display = &self.options().display;
        let format = display.format_options();
        let statement = self.statement();
        let state = self.state();

        let periods: Vec<_> = view.periods().collect();
        let columns = periods
            .iter()
            .zip(self.period_numbers())
            .map(|(period, number)| RenderedColumn {
                period_id: period.period_id.clone(),
                number,
                date_label: format_period_date(period.period_end, display.date_format),
                variant: period.variant.clone(),
                is_active: period.is_active,
                is_included: period.is_included,
            })
            .collect();

        let rows = statement
            .rows()
            .iter()
            .zip(self.row_numbers())
            .enumerate()
            .map(|(r, (row, number))| {
                let cells = if row.row_type.has_cells() {
                    (0..periods.len())
                        .map(|col| {
                            let position = CellPosition::new(r, col);
                            let key = view.cell_key(position);
                            let value = view.value_at(position);
                            let editing = state.editing() == Some(position);
                            let text = if editing {
                                state.edit_value().to_string()
                            } else {
                                format_number(value, &format)
                            };
                            RenderedCell {
                                text,
                                value,
                                focused: state.focused() == Some(position),
                                editing,
                                read_only: !view.is_editable(r),
                                negative: value.map_or(false, |v| v < 0.0),
                                highlight: key
                                    .as_ref()
                                    .and_then(|k| statement.highlights().get_by_key(k).copied()),
                                comment: key
                                    .as_ref()
                                    .and_then(|k| statement.comments().get_by_key(k).cloned()),
                            }
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                RenderedRow {
                    line_item_code: row.line_item_code.clone(),
                    number,
                    label: row.label.clone(),
                    indent_level: row.indent_level,
                    row_type: row.row_type,
                    cells,
                }
            })
            .collect();

        RenderedGrid { columns, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::GridCommand;
    use crate::dialogs::ScriptedDialogs;
    use crate::nav::{Key, KeyInput};
    use crate::testing::grid;
    use finsheet_core::{DisplayScale, FontHighlight, GridOptions, NegativeFormat};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_matrix() {
        let grid = grid(ScriptedDialogs::new());
        let rendered = grid.render();

        assert_eq!(rendered.columns.len(), 2);
        assert_eq!(rendered.columns[1].label(), "12/31/2024");
        assert_eq!(rendered.columns[1].status(), "Active");
        assert_eq!(
            rendered.texts(),
            vec![
                vec![],
                vec!["100", "200"],
                vec!["", "(50)"],
                vec!["", "150"],
                vec![],
                vec!["", ""],
                vec!["", ""],
            ]
        );
        let numbers: Vec<_> = rendered.rows.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![None, Some(1), Some(2), Some(3), None, Some(4), Some(5)]);

        let ar = rendered.cell(CellPosition::new(2, 1)).unwrap();
        assert!(ar.negative);
        assert!(!ar.read_only);
        assert!(rendered.cell(CellPosition::new(3, 1)).unwrap().read_only);
    }

    #[test]
    fn test_render_shows_edit_buffer_and_annotations() {
        let mut grid = grid(ScriptedDialogs::new().answer_with("estimate"));
        let cell = CellPosition::new(1, 0);
        grid.dispatch(GridCommand::ToggleFont {
            cell,
            font: FontHighlight::Green,
        });
        grid.dispatch(GridCommand::EditComment { cell });
        grid.dispatch(GridCommand::Focus(cell));
        grid.dispatch(GridCommand::Key(KeyInput::new(Key::F2)));
        grid.dispatch(GridCommand::Key(KeyInput::new(Key::Char('5'))));

        let rendered = grid.render();
        let rendered_cell = rendered.cell(cell).unwrap();
        assert_eq!(rendered_cell.text, "1005");
        assert!(rendered_cell.editing);
        assert!(rendered_cell.focused);
        assert_eq!(
            rendered_cell.highlight.map(|h| h.font_highlight),
            Some(FontHighlight::Green)
        );
        assert_eq!(rendered_cell.comment.as_deref(), Some("estimate"));
    }

    #[test]
    fn test_render_uses_display_options() {
        let mut options = GridOptions::default();
        options.display.negative_format = NegativeFormat::Minus;
        options.display.display_scale = DisplayScale::Thousands;
        options.display.decimal_places = 2;
        let grid = grid(ScriptedDialogs::new()).with_options(options);

        let rendered = grid.render();
        assert_eq!(rendered.cell(CellPosition::new(2, 1)).unwrap().text, "-0.05");
        assert_eq!(rendered.cell(CellPosition::new(1, 1)).unwrap().text, "0.20");
    }
}
