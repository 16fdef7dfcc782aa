//! Period (column) types and the active-variant audit
//!
//! Several periods may share a `period_end` date. Each of them is a variant
//! of that date, distinguished by its `period_id`. Exactly one variant per
//! date should be active; nothing enforces this, but the audit functions in
//! this module detect groups that break it.

use std::fmt;

use ahash::AHashMap;
use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};
use crate::format::{format_period_date, DateFormat};

/// Reporting period length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PeriodType {
    /// Day
    #[cfg_attr(feature = "serde", serde(rename = "D"))]
    Day,
    /// Month
    #[cfg_attr(feature = "serde", serde(rename = "M"))]
    Month,
    /// Quarter
    #[cfg_attr(feature = "serde", serde(rename = "Q"))]
    Quarter,
    /// Year
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "Y"))]
    Year,
}

impl PeriodType {
    /// Single-letter code
    pub fn code(&self) -> char {
        match self {
            PeriodType::Day => 'D',
            PeriodType::Month => 'M',
            PeriodType::Quarter => 'Q',
            PeriodType::Year => 'Y',
        }
    }

    /// Parse a single-letter code
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'D' => Some(PeriodType::Day),
            'M' => Some(PeriodType::Month),
            'Q' => Some(PeriodType::Quarter),
            'Y' => Some(PeriodType::Year),
            _ => None,
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A reporting period column
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodDefinition {
    /// Unique id, distinct from the date so variants can share a date
    pub period_id: String,
    /// Period end date
    pub period_end: NaiveDate,
    /// Period length
    pub period_type: PeriodType,
    /// Variant label, e.g. "Pro Forma"
    pub variant: Option<String>,
    /// Authoritative variant for its date
    pub is_active: bool,
    /// Selected for the current analysis run
    pub is_included: bool,
}

impl PeriodDefinition {
    /// Create an active, included period with no variant label
    pub fn new(period_id: impl Into<String>, period_end: NaiveDate, period_type: PeriodType) -> Self {
        Self {
            period_id: period_id.into(),
            period_end,
            period_type,
            variant: None,
            is_active: true,
            is_included: true,
        }
    }

    /// Set the variant label
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Set the active flag
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Set the included flag
    pub fn with_included(mut self, is_included: bool) -> Self {
        self.is_included = is_included;
        self
    }

    /// Header label: the formatted date, followed by the variant in parentheses
    pub fn display_label(&self, format: DateFormat) -> String {
        let date = format_period_date(self.period_end, format);
        match &self.variant {
            Some(variant) => format!("{} ({})", date, variant),
            None => date,
        }
    }
}

/// Where to insert relative to a reference column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnSide {
    /// Before the reference column
    Left,
    /// After the reference column
    Right,
}

/// How a new variant column is populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsertMode {
    /// Copy every value of the reference column
    Clone,
    /// Start empty
    Blank,
}

/// Same month and day one year later; Feb 29 becomes Feb 28
pub fn next_year_end(date: NaiveDate) -> Result<NaiveDate> {
    let year = date.year() + 1;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
        .ok_or_else(|| Error::InvalidDate(format!("{} + 1 year", date)))
}

/// Result of [`audit_active_variants`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveVariantAudit {
    /// Dates with no active variant
    pub missing: Vec<NaiveDate>,
    /// Dates with more than one active variant
    pub conflicting: Vec<NaiveDate>,
}

impl ActiveVariantAudit {
    /// No violations found
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.conflicting.is_empty()
    }
}

/// Count active variants per date, in order of first appearance
fn active_counts(periods: &[PeriodDefinition]) -> Vec<(NaiveDate, usize)> {
    let mut order: Vec<(NaiveDate, usize)> = Vec::new();
    let mut index: AHashMap<NaiveDate, usize> = AHashMap::new();
    for period in periods {
        let slot = *index.entry(period.period_end).or_insert_with(|| {
            order.push((period.period_end, 0));
            order.len() - 1
        });
        if period.is_active {
            order[slot].1 += 1;
        }
    }
    order
}

/// Dates where no variant is active, in order of first appearance
///
/// ```rust
/// use chrono::NaiveDate;
/// use finsheet_core::period::{periods_missing_active_variant, PeriodDefinition, PeriodType};
///
/// let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
/// let draft = PeriodDefinition::new("2024-12-31", date, PeriodType::Year).with_active(false);
/// assert_eq!(periods_missing_active_variant(&[draft.clone()]), vec![date]);
///
/// let reviewed = PeriodDefinition::new("2024-12-31-v2", date, PeriodType::Year);
/// assert!(periods_missing_active_variant(&[reviewed, draft]).is_empty());
/// ```
pub fn periods_missing_active_variant(periods: &[PeriodDefinition]) -> Vec<NaiveDate> {
    active_counts(periods)
        .into_iter()
        .filter(|(_, active)| *active == 0)
        .map(|(date, _)| date)
        .collect()
}

/// Dates where more than one variant is active, in order of first appearance
pub fn periods_with_conflicting_active_variants(periods: &[PeriodDefinition]) -> Vec<NaiveDate> {
    active_counts(periods)
        .into_iter()
        .filter(|(_, active)| *active > 1)
        .map(|(date, _)| date)
        .collect()
}

/// Both audits in one pass
pub fn audit_active_variants(periods: &[PeriodDefinition]) -> ActiveVariantAudit {
    let mut audit = ActiveVariantAudit::default();
    for (date, active) in active_counts(periods) {
        match active {
            0 => audit.missing.push(date),
            1 => {}
            _ => audit.conflicting.push(date),
        }
    }
    audit
}
