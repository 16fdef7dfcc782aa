//! Grid display and commit options

use crate::format::{DateFormat, DisplayScale, FormatOptions, NegativeFormat};

/// How values and headers are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayOptions {
    /// Negative number style (default: parentheses)
    pub negative_format: NegativeFormat,
    /// Display magnitude (default: units)
    pub display_scale: DisplayScale,
    /// Period header date layout (default: MM/DD/YYYY)
    pub date_format: DateFormat,
    /// Digits after the decimal point (default: 0)
    pub decimal_places: u8,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            negative_format: NegativeFormat::Parentheses,
            display_scale: DisplayScale::Units,
            date_format: DateFormat::MonthDayYear,
            decimal_places: 0,
        }
    }
}

impl DisplayOptions {
    /// Number formatting subset
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            negative_format: self.negative_format,
            display_scale: self.display_scale,
            decimal_places: self.decimal_places,
        }
    }
}

/// Normalization applied to committed values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CommitPolicy {
    /// Round committed values to cents (default: false)
    pub round_to_cents: bool,
}

/// All grid options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridOptions {
    /// Display settings
    pub display: DisplayOptions,
    /// Commit settings
    pub commit: CommitPolicy,
}
