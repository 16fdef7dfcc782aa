//! Shared fixtures for unit tests

use chrono::NaiveDate;
use finsheet_core::{
    CellKey, PeriodDefinition, PeriodType, RowDefinition, RowType, Statement, ValueStore,
};

use crate::dialogs::ScriptedDialogs;
use crate::grid::Grid;
use crate::observer::Notification;

pub(crate) const FY23: &str = "2023-12-31";
pub(crate) const FY24: &str = "2024-12-31";

pub(crate) fn year_end(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap()
}

/// Rows:
/// 0 ASSETS header, 1 Cash, 2 Receivables, 3 Total Current Assets,
/// 4 spacer, 5 PP&E, 6 Total Assets
pub(crate) fn statement() -> Statement {
    let rows = vec![
        RowDefinition::structural("H.Assets", "ASSETS", RowType::SectionHeader),
        RowDefinition::data("Cash", "Cash", 1),
        RowDefinition::data("AR", "Receivables", 1),
        RowDefinition::structural("TCA", "Total Current Assets", RowType::Subtotal),
        RowDefinition::structural("S1", "", RowType::Spacer),
        RowDefinition::data("PPE", "PP&E", 1),
        RowDefinition::structural("TA", "Total Assets", RowType::Total),
    ];
    let periods = vec![
        PeriodDefinition::new(FY23, year_end(2023), PeriodType::Year),
        PeriodDefinition::new(FY24, year_end(2024), PeriodType::Year),
    ];
    let mut values = ValueStore::new();
    values.set_value(CellKey::new("Cash", FY23), Some(100.0));
    values.set_value(CellKey::new("Cash", FY24), Some(200.0));
    values.set_value(CellKey::new("AR", FY24), Some(-50.0));
    values.set_value(CellKey::new("TCA", FY24), Some(150.0));
    Statement::from_parts(rows, periods, values).unwrap()
}

pub(crate) fn grid(dialogs: ScriptedDialogs) -> Grid<ScriptedDialogs, Vec<Notification>> {
    Grid::new(statement(), dialogs, Vec::new())
}
