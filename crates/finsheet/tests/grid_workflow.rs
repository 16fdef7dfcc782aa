//! End-to-end tests driving the sample balance sheet through the grid

use finsheet::prelude::*;
use finsheet::NavMode;
use finsheet::sample::{self, PERIOD_IDS};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const CASH: usize = 1;
const AR: usize = 2;
const INVENTORY: usize = 3;
const SUBTOTAL_CURRENT: usize = 4;
const PPE: usize = 6;

fn key(name: &str) -> GridCommand {
    GridCommand::Key(KeyInput::parse(name).unwrap())
}

fn at(row: usize, col: usize) -> CellPosition {
    CellPosition::new(row, col)
}

fn sample_grid() -> Grid {
    Grid::new(sample::balance_sheet(), AutoConfirm::new(), Vec::new())
}

fn scripted_grid(dialogs: ScriptedDialogs) -> Grid<ScriptedDialogs> {
    Grid::new(sample::balance_sheet(), dialogs, Vec::new())
}

fn cells_changed(notifications: &[Notification]) -> usize {
    notifications
        .iter()
        .filter(|n| matches!(n, Notification::CellsChanged(_)))
        .count()
}

/// Arrow keys stop only on data rows
#[test]
fn test_vertical_navigation_skips_structure() {
    let mut grid = sample_grid();
    grid.dispatch(key("ArrowDown"));
    assert_eq!(grid.state().focused(), Some(at(CASH, 0)));

    grid.dispatch(key("ArrowDown"));
    grid.dispatch(key("ArrowDown"));
    assert_eq!(grid.state().focused(), Some(at(INVENTORY, 0)));

    // Subtotal and spacer are skipped
    grid.dispatch(key("ArrowDown"));
    assert_eq!(grid.state().focused(), Some(at(PPE, 0)));

    grid.dispatch(key("ArrowUp"));
    assert_eq!(grid.state().focused(), Some(at(INVENTORY, 0)));
}

/// Tab and Shift+Tab stay within the row
#[test]
fn test_horizontal_navigation() {
    let mut grid = sample_grid();
    grid.dispatch(GridCommand::Focus(at(CASH, 0)));
    grid.dispatch(key("Tab"));
    grid.dispatch(key("Tab"));
    assert_eq!(grid.state().focused(), Some(at(CASH, 2)));

    // Last column: nowhere to go
    assert_eq!(grid.dispatch(key("Tab")), Dispatch::Unchanged);
    assert_eq!(grid.state().focused(), Some(at(CASH, 2)));

    grid.dispatch(key("shift+Tab"));
    assert_eq!(grid.state().focused(), Some(at(CASH, 1)));
}

/// Typing starts an edit seeded with the stored value
#[test]
fn test_edit_buffer_is_seeded() {
    let mut grid = sample_grid();
    grid.dispatch(GridCommand::Focus(at(CASH, 0)));
    grid.dispatch(key("7"));
    assert_eq!(grid.state().mode(), NavMode::Editing);
    assert_eq!(grid.state().edit_value(), "618000");
}

/// Committing an unmodified edit writes nothing
#[test]
fn test_unmodified_edit_is_not_a_change() {
    let mut grid = sample_grid();
    grid.dispatch(GridCommand::BeginEdit(at(AR, 1)));
    grid.dispatch(key("Enter"));

    assert_eq!(grid.statement().value("Asset.Current.AR", PERIOD_IDS[1]), Some(2_580_000.0));
    assert!(grid.observer().is_empty());
    assert_eq!(grid.state().focused(), Some(at(INVENTORY, 1)));
}

/// Each commit produces exactly one change notification
#[test]
fn test_one_notification_per_commit() {
    let mut grid = sample_grid();

    grid.dispatch(GridCommand::BeginEdit(at(CASH, 0)));
    grid.dispatch(GridCommand::EditText("(1,250)".to_string()));
    grid.dispatch(key("Tab"));

    grid.dispatch(GridCommand::BeginEdit(at(AR, 2)));
    grid.dispatch(GridCommand::EditText("".to_string()));
    grid.dispatch(GridCommand::Blur);

    grid.dispatch(GridCommand::Focus(at(INVENTORY, 0)));
    grid.dispatch(key("Delete"));

    let statement = grid.statement();
    assert_eq!(statement.value("Asset.Current.Cash", PERIOD_IDS[0]), Some(-1250.0));
    assert_eq!(statement.value("Asset.Current.AR", PERIOD_IDS[2]), None);
    assert_eq!(statement.value("Asset.Current.Inventory", PERIOD_IDS[0]), None);
    assert_eq!(cells_changed(grid.observer()), 3);

    match &grid.observer()[0] {
        Notification::CellsChanged(changes) => {
            assert_eq!(
                changes,
                &vec![CellChange::new(
                    "Asset.Current.Cash",
                    PERIOD_IDS[0],
                    Some(618_000.0),
                    Some(-1250.0)
                )]
            );
        }
        other => panic!("expected a cell change, got {}", other),
    }
}

/// Totals take pointer focus but never accept input
#[test]
fn test_totals_are_read_only() {
    let mut grid = sample_grid();
    assert!(grid.dispatch(GridCommand::Focus(at(SUBTOTAL_CURRENT, 0))).is_applied());
    grid.dispatch(key("F2"));
    grid.dispatch(key("Delete"));
    assert_eq!(grid.state().mode(), NavMode::Idle);
    assert_eq!(
        grid.statement().value("SUBTOTAL_CurrentAssets", PERIOD_IDS[0]),
        Some(3_930_000.0)
    );

    let rendered = grid.render();
    assert!(rendered.cell(at(SUBTOTAL_CURRENT, 0)).unwrap().read_only);
}

/// Headers and spacers cannot be focused
#[test]
fn test_header_cannot_take_focus() {
    let mut grid = sample_grid();
    assert_eq!(grid.dispatch(GridCommand::Focus(at(0, 0))), Dispatch::Unchanged);
    assert_eq!(grid.state().focused(), None);
}

/// Deleting a row removes its values, highlights and comments only
#[test]
fn test_delete_row_cascades() {
    let mut grid = scripted_grid(ScriptedDialogs::new().answer_with("Check").confirm_with(true));
    grid.dispatch(GridCommand::EditComment { cell: at(CASH, 0) });
    grid.dispatch(GridCommand::ToggleBoldBorder { cell: at(CASH, 1) });
    grid.dispatch(GridCommand::ToggleBoldBorder { cell: at(AR, 1) });

    assert!(grid.dispatch(GridCommand::DeleteRow { row: CASH }).is_applied());
    assert_eq!(grid.dialogs().asked().last().map(String::as_str), Some("Delete \"Cash\"?"));

    let statement = grid.statement();
    assert_eq!(statement.rows().len(), 15);
    assert!(statement.values().keys().all(|k| !k.belongs_to_line_item("Asset.Current.Cash")));
    assert!(statement.comments().is_empty());
    assert_eq!(statement.highlights().len(), 1);
    assert_eq!(statement.values().len(), 33);
}

/// Declining the confirmation leaves the statement untouched
#[test]
fn test_declined_confirmation() {
    let mut grid = scripted_grid(ScriptedDialogs::new().confirm_with(false).confirm_with(false));
    let before = grid.statement().clone();

    assert_eq!(grid.dispatch(GridCommand::DeleteRow { row: AR }), Dispatch::Cancelled);
    assert_eq!(grid.dispatch(GridCommand::DeletePeriod { col: 0 }), Dispatch::Cancelled);

    assert_eq!(grid.statement().rows(), before.rows());
    assert_eq!(grid.statement().periods(), before.periods());
    assert_eq!(grid.statement().values(), before.values());
    assert!(grid.observer().is_empty());
}

/// Structural rows cannot be deleted
#[test]
fn test_delete_total_refused() {
    let mut grid = sample_grid();
    match grid.dispatch(GridCommand::DeleteRow { row: 9 }) {
        Dispatch::Refused(Error::StructuralRow(code)) => assert_eq!(code, "TOTAL_Assets"),
        other => panic!("expected refusal, got {:?}", other),
    }
}

/// Inserted rows get a fresh code and the prompted label
#[test]
fn test_insert_row() {
    let mut grid = scripted_grid(ScriptedDialogs::new().answer_with("  Prepaid Expenses "));
    assert!(grid
        .dispatch(GridCommand::InsertRow { row: INVENTORY, side: RowSide::Below })
        .is_applied());

    let row = grid.statement().row(INVENTORY + 1).unwrap();
    assert_eq!(row.label, "Prepaid Expenses");
    assert_eq!(row.row_type, RowType::Data);
    assert!(row.line_item_code.starts_with("ROW_"));

    // Numbering shifts for the rows after the insert
    let numbers = grid.row_numbers();
    assert_eq!(&numbers[..6], &[None, Some(1), Some(2), Some(3), Some(4), Some(5)]);
}

/// A cancelled prompt inserts nothing
#[test]
fn test_insert_row_cancelled() {
    let mut grid = scripted_grid(ScriptedDialogs::new().cancel_next());
    assert_eq!(
        grid.dispatch(GridCommand::InsertRow { row: CASH, side: RowSide::Above }),
        Dispatch::Cancelled
    );
    assert_eq!(grid.statement().rows().len(), 16);
}

/// Clone copies the reference column, Blank starts empty; both start inactive
#[test]
fn test_clone_and_blank_variants() {
    let mut grid = scripted_grid(ScriptedDialogs::new().answer_with("Audited").answer_with("Budget"));
    grid.dispatch(GridCommand::InsertColumn {
        col: 2,
        side: ColumnSide::Right,
        mode: InsertMode::Clone,
    });
    grid.dispatch(GridCommand::InsertColumn {
        col: 0,
        side: ColumnSide::Left,
        mode: InsertMode::Blank,
    });

    let periods = grid.statement().periods();
    assert_eq!(periods.len(), 5);
    assert_eq!(periods[0].period_id, "2022-12-31-v2");
    assert_eq!(periods[0].variant.as_deref(), Some("Budget"));
    assert!(!periods[0].is_active);
    assert_eq!(periods[4].period_id, "2024-12-31-v2");
    assert!(!periods[4].is_active);

    let values = grid.statement().values();
    assert_eq!(values.period_entries("2024-12-31-v2").count(), 12);
    assert_eq!(values.period_entries("2022-12-31-v2").count(), 0);
    assert_eq!(values.value("Asset.Current.Cash", "2024-12-31-v2"), Some(890_000.0));

    // Variants share their date's number
    assert_eq!(grid.period_numbers(), vec![1, 1, 2, 3, 3]);
    assert!(grid.audit().is_clean());
}

/// The audit flags dates without an active variant and dates with two
#[test]
fn test_active_variant_audit() {
    let mut grid = scripted_grid(ScriptedDialogs::new().answer_with("Restated"));
    grid.dispatch(GridCommand::InsertColumn {
        col: 1,
        side: ColumnSide::Right,
        mode: InsertMode::Clone,
    });

    // Activate the variant: two actives for 2023
    grid.dispatch(GridCommand::ToggleActive { col: 2 });
    let audit = grid.audit();
    assert_eq!(audit.conflicting, vec![sample::periods()[1].period_end]);

    // Deactivate both: none active for 2023
    grid.dispatch(GridCommand::ToggleActive { col: 1 });
    grid.dispatch(GridCommand::ToggleActive { col: 2 });
    let audit = grid.audit();
    assert!(audit.conflicting.is_empty());
    assert_eq!(audit.missing, vec![sample::periods()[1].period_end]);
}

/// Deleting the last period is refused
#[test]
fn test_last_period_is_kept() {
    let mut grid = sample_grid();
    assert!(grid.dispatch(GridCommand::RemovePeriod).is_applied());
    assert!(grid.dispatch(GridCommand::DeletePeriod { col: 0 }).is_applied());
    assert_eq!(grid.statement().periods().len(), 1);
    assert_eq!(
        grid.dispatch(GridCommand::RemovePeriod),
        Dispatch::Refused(Error::LastPeriod)
    );
    assert_eq!(
        grid.dispatch(GridCommand::DeletePeriod { col: 0 }),
        Dispatch::Refused(Error::LastPeriod)
    );
    assert_eq!(grid.statement().values().len(), 12);
}

/// Adding a period appends the next year end
#[test]
fn test_add_period() {
    let mut grid = sample_grid();
    assert!(grid.dispatch(GridCommand::AddPeriod).is_applied());
    let last = grid.statement().periods().last().unwrap();
    assert_eq!(last.period_id, "2025-12-31");
    assert!(last.is_active);
    assert_eq!(grid.statement().values().period_entries("2025-12-31").count(), 0);
}

/// Clearing a period removes values but keeps annotations
#[test]
fn test_clear_period_keeps_annotations() {
    let mut grid = scripted_grid(ScriptedDialogs::new().answer_with("tie out").confirm_with(true));
    grid.dispatch(GridCommand::EditComment { cell: at(CASH, 1) });
    assert!(grid.dispatch(GridCommand::ClearPeriod { col: 1 }).is_applied());

    let statement = grid.statement();
    assert_eq!(statement.values().period_entries(PERIOD_IDS[1]).count(), 0);
    assert_eq!(statement.values().len(), 24);
    assert_eq!(statement.comments().len(), 1);
    assert!(grid
        .observer()
        .iter()
        .any(|n| matches!(n, Notification::PeriodCleared { values_removed: 12, .. })));
}

/// The pending edit commits, then focus is pulled back inside the matrix
/// after the focused column goes away
#[test]
fn test_focus_clamped_after_period_removal() {
    let mut grid = sample_grid();
    grid.dispatch(GridCommand::BeginEdit(at(PPE, 2)));
    grid.dispatch(GridCommand::EditText("1".to_string()));

    grid.dispatch(GridCommand::RemovePeriod);
    assert_eq!(grid.statement().periods().len(), 2);
    assert_eq!(grid.state().focused(), Some(at(PPE, 1)));
    assert_eq!(grid.state().mode(), NavMode::Idle);
    assert_eq!(cells_changed(grid.observer()), 1);
}

/// Structural changes away from the edited cell keep what was typed
#[test]
fn test_move_row_commits_pending_edit() {
    let mut grid = sample_grid();
    grid.dispatch(GridCommand::BeginEdit(at(CASH, 0)));
    grid.dispatch(GridCommand::EditText("(5,000)".to_string()));

    grid.dispatch(GridCommand::MoveRow { row: AR, direction: MoveDirection::Down });
    assert_eq!(grid.statement().value("Asset.Current.Cash", "2022-12-31"), Some(-5000.0));
    assert_eq!(grid.state().mode(), NavMode::Idle);
    assert_eq!(cells_changed(grid.observer()), 1);
}

/// Focus is pulled back onto a row with cells after a delete
#[test]
fn test_focus_clamped_after_row_removal() {
    let mut grid = sample_grid();
    grid.dispatch(GridCommand::Focus(at(15, 0)));
    grid.dispatch(GridCommand::MoveRow { row: 14, direction: MoveDirection::Down });
    assert_eq!(grid.statement().row(15).unwrap().line_item_code, "SUBTOTAL_CurrentLiab");

    grid.dispatch(GridCommand::DeleteRow { row: 13 });
    assert_eq!(grid.statement().rows().len(), 15);
    assert_eq!(grid.state().focused(), Some(at(14, 0)));
}

/// Hidden period dates disappear from the columns and the navigation
#[test]
fn test_hidden_periods() {
    let mut grid = sample_grid();
    let hidden = sample::periods()[1].period_end;
    grid.dispatch(GridCommand::HidePeriodEnd(hidden));

    let rendered = grid.render();
    assert_eq!(rendered.columns.len(), 2);
    assert_eq!(rendered.columns[1].period_id, PERIOD_IDS[2]);
    assert_eq!(rendered.rows[CASH].cells[1].text, "890,000");

    grid.dispatch(GridCommand::ShowPeriodEnd(hidden));
    assert_eq!(grid.render().columns.len(), 3);
}

/// Negative values render in parentheses
#[test]
fn test_render_accounting_format() {
    let grid = sample_grid();
    let rendered = grid.render();
    let cell = rendered.cell(at(7, 0)).unwrap();
    assert_eq!(cell.text, "(1,450,000)");
    assert!(cell.negative);
    assert_eq!(rendered.columns[0].label(), "12/31/2022");
    assert_eq!(rendered.columns[0].status(), "Active");
}

proptest! {
    /// Deleting one row never touches another row's entries
    #[test]
    fn prop_row_delete_is_isolated(row in 0usize..16) {
        let mut grid = sample_grid();
        let before = grid.statement().clone();
        let outcome = grid.dispatch(GridCommand::DeleteRow { row });
        let deleted = &before.rows()[row];

        if deleted.row_type == RowType::Data {
            prop_assert!(outcome.is_applied());
        } else {
            prop_assert!(!outcome.is_applied());
        }
        for (k, v) in before.values().iter() {
            if outcome.is_applied() && k.belongs_to_line_item(&deleted.line_item_code) {
                prop_assert_eq!(grid.statement().values().get_by_key(k), None);
            } else {
                prop_assert_eq!(grid.statement().values().get_by_key(k), Some(v));
            }
        }
    }

    /// Re-editing a committed value and committing again changes nothing
    #[test]
    fn prop_edit_roundtrip(cents in -1_000_000_000i64..1_000_000_000) {
        let value = cents as f64 / 100.0;
        let mut grid = sample_grid();
        grid.dispatch(GridCommand::BeginEdit(at(CASH, 0)));
        grid.dispatch(GridCommand::EditText(value.to_string()));
        grid.dispatch(GridCommand::Blur);

        grid.dispatch(GridCommand::BeginEdit(at(CASH, 0)));
        grid.dispatch(GridCommand::Blur);

        prop_assert_eq!(grid.statement().value("Asset.Current.Cash", PERIOD_IDS[0]), Some(value));
        prop_assert!(cells_changed(grid.observer()) <= 1);
    }
}
