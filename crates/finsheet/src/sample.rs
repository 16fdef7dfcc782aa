//! A sample balance sheet
//!
//! Three fiscal years of a small company's assets and liabilities. Used by
//! the CLI when no value file is given and by the integration tests.

use chrono::NaiveDate;
use finsheet_core::{
    CellKey, PeriodDefinition, PeriodType, Result, RowDefinition, RowType, Statement, ValueStore,
};

/// Fiscal year-end ids, oldest first
pub const PERIOD_IDS: [&str; 3] = ["2022-12-31", "2023-12-31", "2024-12-31"];

/// (code, label, type)
const ROWS: &[(&str, &str, RowType)] = &[
    ("HEADER_ASSETS", "ASSETS", RowType::SectionHeader),
    ("Asset.Current.Cash", "Cash", RowType::Data),
    ("Asset.Current.AR", "Accounts Receivable", RowType::Data),
    ("Asset.Current.Inventory", "Inventory", RowType::Data),
    ("SUBTOTAL_CurrentAssets", "Total Current Assets", RowType::Subtotal),
    ("SPACER_1", "", RowType::Spacer),
    ("Asset.Fixed.PPE", "Property, Plant & Equipment", RowType::Data),
    ("Asset.Fixed.AccumDepr", "Accumulated Depreciation", RowType::Data),
    ("SUBTOTAL_FixedAssets", "Total Fixed Assets", RowType::Subtotal),
    ("TOTAL_Assets", "TOTAL ASSETS", RowType::Total),
    ("SPACER_2", "", RowType::Spacer),
    ("HEADER_LIABILITIES", "LIABILITIES", RowType::SectionHeader),
    ("Liability.Current.AP", "Accounts Payable", RowType::Data),
    ("Liability.Current.AccruedExp", "Accrued Expenses", RowType::Data),
    ("SUBTOTAL_CurrentLiab", "Total Current Liabilities", RowType::Subtotal),
    ("TOTAL_Liabilities", "TOTAL LIABILITIES", RowType::Total),
];

/// (code, FY2022, FY2023, FY2024)
const VALUES: &[(&str, [f64; 3])] = &[
    ("Asset.Current.Cash", [618_000.0, 725_000.0, 890_000.0]),
    ("Asset.Current.AR", [2_332_000.0, 2_580_000.0, 2_850_000.0]),
    ("Asset.Current.Inventory", [980_000.0, 1_100_000.0, 1_250_000.0]),
    ("SUBTOTAL_CurrentAssets", [3_930_000.0, 4_405_000.0, 4_990_000.0]),
    ("Asset.Fixed.PPE", [5_800_000.0, 6_400_000.0, 7_100_000.0]),
    ("Asset.Fixed.AccumDepr", [-1_450_000.0, -1_750_000.0, -2_100_000.0]),
    ("SUBTOTAL_FixedAssets", [4_350_000.0, 4_650_000.0, 5_000_000.0]),
    ("TOTAL_Assets", [8_280_000.0, 9_055_000.0, 9_990_000.0]),
    ("Liability.Current.AP", [1_150_000.0, 1_320_000.0, 1_480_000.0]),
    ("Liability.Current.AccruedExp", [298_000.0, 345_000.0, 392_000.0]),
    ("SUBTOTAL_CurrentLiab", [1_448_000.0, 1_665_000.0, 1_872_000.0]),
    ("TOTAL_Liabilities", [1_448_000.0, 1_665_000.0, 1_872_000.0]),
];

/// Row definitions of the sample
pub fn rows() -> Vec<RowDefinition> {
    ROWS.iter()
        .map(|&(code, label, row_type)| match row_type {
            RowType::Data => RowDefinition::data(code, label, 1),
            _ => RowDefinition::structural(code, label, row_type),
        })
        .collect()
}

/// Year-end periods of the sample
pub fn periods() -> Vec<PeriodDefinition> {
    PERIOD_IDS
        .iter()
        .zip(2022..)
        .filter_map(|(&id, year)| {
            NaiveDate::from_ymd_opt(year, 12, 31)
                .map(|end| PeriodDefinition::new(id, end, PeriodType::Year))
        })
        .collect()
}

/// Values of the sample
pub fn values() -> ValueStore {
    VALUES
        .iter()
        .flat_map(|(code, amounts)| {
            PERIOD_IDS
                .iter()
                .zip(amounts)
                .map(move |(period_id, &amount)| (CellKey::new(code, period_id), amount))
        })
        .collect()
}

/// The whole sample statement
pub fn balance_sheet() -> Statement {
    // The fixed sample tables always form a valid statement
    balance_sheet_with_values(values()).unwrap_or_default()
}

/// The sample rows and periods with other values
pub fn balance_sheet_with_values(values: ValueStore) -> Result<Statement> {
    Statement::from_parts(rows(), periods(), values)
}
