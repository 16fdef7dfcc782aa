//! Context menus for row headers, column headers and cells
//!
//! Menus are plain data: each item carries the [`GridCommand`] it would
//! dispatch together with its enabled state, so hosts can render them with
//! any toolkit.

use finsheet_core::{BackgroundHighlight, ColumnSide, FontHighlight, InsertMode, MoveDirection, RowSide};

use crate::command::GridCommand;
use crate::grid::Grid;
use crate::nav::CellPosition;

const CHECK: &str = "✓ ";
const NO_CHECK: &str = "  ";

/// One menu line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item(MenuItem),
    /// Non-clickable group title
    Heading(String),
    Separator,
}

/// A clickable action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub command: GridCommand,
    pub enabled: bool,
}

impl MenuEntry {
    fn item(label: impl Into<String>, command: GridCommand) -> Self {
        MenuEntry::Item(MenuItem {
            label: label.into(),
            command,
            enabled: true,
        })
    }

    fn item_if(label: impl Into<String>, command: GridCommand, enabled: bool) -> Self {
        MenuEntry::Item(MenuItem {
            label: label.into(),
            command,
            enabled,
        })
    }

    /// The entry as a clickable item
    pub fn as_item(&self) -> Option<&MenuItem> {
        match self {
            MenuEntry::Item(item) => Some(item),
            _ => None,
        }
    }
}

/// Find an item by label
pub fn find_item<'a>(entries: &'a [MenuEntry], label: &str) -> Option<&'a MenuItem> {
    entries
        .iter()
        .filter_map(MenuEntry::as_item)
        .find(|item| item.label == label)
}

fn checked(label: &str, on: bool) -> String {
    format!("{}{}", if on { CHECK } else { NO_CHECK }, label)
}

impl<D, O> Grid<D, O> {
    /// Row header menu; empty when the row does not exist
    pub fn row_menu(&self, row: usize) -> Vec<MenuEntry> {
        let rows = self.statement().rows();
        let Some(definition) = rows.get(row) else {
            return Vec::new();
        };
        vec![
            MenuEntry::item(
                "Insert Row Above",
                GridCommand::InsertRow {
                    row,
                    side: RowSide::Above,
                },
            ),
            MenuEntry::item(
                "Insert Row Below",
                GridCommand::InsertRow {
                    row,
                    side: RowSide::Below,
                },
            ),
            MenuEntry::Separator,
            MenuEntry::item_if(
                "Move Row Up",
                GridCommand::MoveRow {
                    row,
                    direction: MoveDirection::Up,
                },
                row > 0,
            ),
            MenuEntry::item_if(
                "Move Row Down",
                GridCommand::MoveRow {
                    row,
                    direction: MoveDirection::Down,
                },
                row + 1 < rows.len(),
            ),
            MenuEntry::Separator,
            MenuEntry::item_if(
                "Delete Row",
                GridCommand::DeleteRow { row },
                !definition.row_type.is_structural(),
            ),
        ]
    }

    /// Column header menu; empty when the column is not visible
    pub fn column_menu(&self, col: usize) -> Vec<MenuEntry> {
        let Some(period) = self.period_at(col) else {
            return Vec::new();
        };
        let insert = |side, mode| GridCommand::InsertColumn { col, side, mode };
        let active_label = if period.is_active {
            "✓ Active (click to deactivate)"
        } else {
            "Set as Active"
        };
        vec![
            MenuEntry::item("Insert Blank Column Left", insert(ColumnSide::Left, InsertMode::Blank)),
            MenuEntry::item("Insert Blank Column Right", insert(ColumnSide::Right, InsertMode::Blank)),
            MenuEntry::Separator,
            MenuEntry::item("Clone Column Left", insert(ColumnSide::Left, InsertMode::Clone)),
            MenuEntry::item("Clone Column Right", insert(ColumnSide::Right, InsertMode::Clone)),
            MenuEntry::Separator,
            MenuEntry::item(active_label, GridCommand::ToggleActive { col }),
            MenuEntry::item(
                checked("Included", period.is_included),
                GridCommand::SetIncluded {
                    col,
                    included: !period.is_included,
                },
            ),
            MenuEntry::Separator,
            MenuEntry::item("Clear Values", GridCommand::ClearPeriod { col }),
            MenuEntry::item_if(
                "Delete Column",
                GridCommand::DeletePeriod { col },
                self.statement().periods().len() > 1,
            ),
        ]
    }

    /// Cell menu; empty for rows without cells
    pub fn cell_menu(&self, cell: CellPosition) -> Vec<MenuEntry> {
        let Some(key) = self.cell_key(cell) else {
            return Vec::new();
        };
        let statement = self.statement();
        let highlight = statement.highlights().highlight_or_default(&key);
        let has_comment = statement.comments().contains(&key);

        let mut entries = vec![MenuEntry::Heading("Font Color".to_string())];
        for font in FontHighlight::ALL {
            entries.push(MenuEntry::item(
                checked(font.label(), highlight.font_highlight == font),
                GridCommand::ToggleFont { cell, font },
            ));
        }
        entries.push(MenuEntry::Separator);
        entries.push(MenuEntry::Heading("Background".to_string()));
        for background in BackgroundHighlight::ALL {
            entries.push(MenuEntry::item(
                checked(background.label(), highlight.background_highlight == background),
                GridCommand::ToggleBackground { cell, background },
            ));
        }
        entries.push(MenuEntry::Separator);
        entries.push(MenuEntry::item(
            checked("Bold Border", highlight.bold_border),
            GridCommand::ToggleBoldBorder { cell },
        ));
        entries.push(MenuEntry::Separator);
        entries.push(MenuEntry::item_if(
            "Clear All Formatting",
            GridCommand::ClearFormatting { cell },
            !highlight.is_empty(),
        ));
        entries.push(MenuEntry::Separator);
        entries.push(MenuEntry::item(
            if has_comment { "Edit Comment" } else { "Add Comment" },
            GridCommand::EditComment { cell },
        ));
        entries.push(MenuEntry::item_if(
            "Remove Comment",
            GridCommand::RemoveComment { cell },
            has_comment,
        ));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::ScriptedDialogs;
    use crate::testing::grid;
    use pretty_assertions::assert_eq;

    fn enabled(entries: &[MenuEntry], label: &str) -> bool {
        find_item(entries, label)
            .unwrap_or_else(|| panic!("no item {:?}", label))
            .enabled
    }

    #[test]
    fn test_row_menu_bounds() {
        let grid = grid(ScriptedDialogs::new());
        let first = grid.row_menu(0);
        assert!(!enabled(&first, "Move Row Up"));
        assert!(enabled(&first, "Move Row Down"));
        // Section header
        assert!(!enabled(&first, "Delete Row"));

        let last = grid.row_menu(6);
        assert!(!enabled(&last, "Move Row Down"));
        assert!(enabled(&grid.row_menu(1), "Delete Row"));
        assert!(grid.row_menu(7).is_empty());
    }

    #[test]
    fn test_column_menu() {
        let mut grid = grid(ScriptedDialogs::new().confirm_with(true));
        let menu = grid.column_menu(0);
        assert!(find_item(&menu, "✓ Active (click to deactivate)").is_some());
        assert!(enabled(&menu, "Delete Column"));
        assert_eq!(
            find_item(&menu, "Clone Column Right").map(|i| i.command.clone()),
            Some(GridCommand::InsertColumn {
                col: 0,
                side: ColumnSide::Right,
                mode: InsertMode::Clone
            })
        );

        grid.dispatch(GridCommand::ToggleActive { col: 0 });
        grid.dispatch(GridCommand::DeletePeriod { col: 1 });
        let menu = grid.column_menu(0);
        assert!(find_item(&menu, "Set as Active").is_some());
        assert!(!enabled(&menu, "Delete Column"));
    }

    #[test]
    fn test_cell_menu_checks_and_comment_labels() {
        let mut grid = grid(ScriptedDialogs::new().answer_with("tie to ledger"));
        let cell = CellPosition::new(1, 0);

        let menu = grid.cell_menu(cell);
        assert!(find_item(&menu, "  Bold Red").is_some());
        assert!(!enabled(&menu, "Clear All Formatting"));
        assert!(find_item(&menu, "Add Comment").is_some());
        assert!(!enabled(&menu, "Remove Comment"));

        grid.dispatch(GridCommand::ToggleBackground {
            cell,
            background: BackgroundHighlight::Yellow,
        });
        grid.dispatch(GridCommand::EditComment { cell });

        let menu = grid.cell_menu(cell);
        assert!(find_item(&menu, "✓ Yellow").is_some());
        assert!(find_item(&menu, "  Orange").is_some());
        assert!(enabled(&menu, "Clear All Formatting"));
        assert!(find_item(&menu, "Edit Comment").is_some());
        assert!(enabled(&menu, "Remove Comment"));

        assert!(grid.cell_menu(CellPosition::new(0, 0)).is_empty());
    }

    #[test]
    fn test_menu_commands_dispatch() {
        let mut grid = grid(ScriptedDialogs::new());
        let cell = CellPosition::new(2, 1);
        let menu = grid.cell_menu(cell);
        let command = find_item(&menu, "  Bold Border").unwrap().command.clone();
        grid.dispatch(command);
        let menu = grid.cell_menu(cell);
        assert!(find_item(&menu, "✓ Bold Border").is_some());
    }
}
