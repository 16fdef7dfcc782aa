//! Row and period numbering shown in the grid headers
//!
//! Both views are derived from the current row and period sequences on every
//! call and never cached.

use finsheet_core::{PeriodDefinition, RowDefinition};

/// 1-based numbers for data, subtotal and total rows; `None` for the rest
pub fn row_numbers(rows: &[RowDefinition]) -> Vec<Option<usize>> {
    let mut next = 0;
    rows.iter()
        .map(|row| {
            row.row_type.is_numbered().then(|| {
                next += 1;
                next
            })
        })
        .collect()
}

/// 1-based period numbers; adjacent variants of one date share a number
pub fn period_numbers<'a, I>(periods: I) -> Vec<usize>
where
    I: IntoIterator<Item = &'a PeriodDefinition>,
{
    let mut numbers = Vec::new();
    let mut current = 0;
    let mut previous_end = None;
    for period in periods {
        if previous_end != Some(period.period_end) {
            current += 1;
            previous_end = Some(period.period_end);
        }
        numbers.push(current);
    }
    numbers
}
