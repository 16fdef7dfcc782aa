//! Number and date display formatting
//!
//! Display strings are lossy: values are scaled and rounded for presentation.
//! Edit strings are not: [`format_for_editing`] always shows the stored value
//! at full precision, and [`parse_number`] reads it back exactly.

use chrono::NaiveDate;
use lazy_regex::regex_is_match;

/// Largest supported number of decimal places
pub const MAX_DECIMAL_PLACES: u8 = 10;

/// How negative numbers are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NegativeFormat {
    /// `(1,093)`
    #[default]
    Parentheses,
    /// `-1,093`
    Minus,
}

/// Magnitude at which values are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DisplayScale {
    /// Full magnitude, intended for use with decimal places
    Decimal,
    /// Full magnitude
    #[default]
    Units,
    /// Divided by 1,000
    Thousands,
    /// Divided by 1,000,000
    Millions,
}

impl DisplayScale {
    /// Divisor applied before display
    pub fn divisor(&self) -> f64 {
        match self {
            DisplayScale::Decimal | DisplayScale::Units => 1.0,
            DisplayScale::Thousands => 1_000.0,
            DisplayScale::Millions => 1_000_000.0,
        }
    }
}

/// Period header date layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateFormat {
    /// `12/31/2024`
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "MM/DD/YYYY"))]
    MonthDayYear,
    /// `12/31/24`
    #[cfg_attr(feature = "serde", serde(rename = "MM/DD/YY"))]
    MonthDayShortYear,
    /// `12/24`
    #[cfg_attr(feature = "serde", serde(rename = "MM/YY"))]
    MonthShortYear,
}

impl DateFormat {
    /// chrono format string for this layout
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::MonthDayYear => "%m/%d/%Y",
            DateFormat::MonthDayShortYear => "%m/%d/%y",
            DateFormat::MonthShortYear => "%m/%y",
        }
    }
}

/// Options for [`format_number`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatOptions {
    /// Negative number style
    pub negative_format: NegativeFormat,
    /// Display magnitude
    pub display_scale: DisplayScale,
    /// Digits after the decimal point
    pub decimal_places: u8,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            negative_format: NegativeFormat::Parentheses,
            display_scale: DisplayScale::Units,
            decimal_places: 0,
        }
    }
}

/// Format a stored value for display
///
/// ```rust
/// use finsheet_core::format::{format_number, DisplayScale, FormatOptions, NegativeFormat};
///
/// let opts = FormatOptions::default();
/// assert_eq!(format_number(Some(-1093.0), &opts), "(1,093)");
/// assert_eq!(format_number(None, &opts), "");
///
/// let opts = FormatOptions {
///     negative_format: NegativeFormat::Minus,
///     display_scale: DisplayScale::Thousands,
///     decimal_places: 1,
/// };
/// assert_eq!(format_number(Some(-1093.0), &opts), "-1.1");
/// ```
pub fn format_number(value: Option<f64>, options: &FormatOptions) -> String {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return String::new(),
    };

    let decimals = options.decimal_places.min(MAX_DECIMAL_PLACES) as u32;
    let scaled = value / options.display_scale.divisor();
    let magnitude = scaled.abs() * 10f64.powi(decimals as i32);
    let units = magnitude.round();

    let digits = if units < 1e30 {
        fixed_point(units as u128, decimals)
    } else {
        format!("{:.*}", decimals as usize, scaled.abs())
    };
    let formatted = group_thousands(&digits);

    // A value that rounds to zero is shown without a sign
    if scaled < 0.0 && units != 0.0 {
        match options.negative_format {
            NegativeFormat::Parentheses => format!("({})", formatted),
            NegativeFormat::Minus => format!("-{}", formatted),
        }
    } else {
        formatted
    }
}

/// Render an integer count of `10^-decimals` units as a decimal string
fn fixed_point(units: u128, decimals: u32) -> String {
    if decimals == 0 {
        return units.to_string();
    }
    let base = 10u128.pow(decimals);
    format!(
        "{}.{:0width$}",
        units / base,
        units % base,
        width = decimals as usize
    )
}

/// Insert `,` every three digits of the integer part
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Parse user input into a value
///
/// Blank input and anything that is not a plain decimal number yield `None`,
/// which the grid commits as a cleared cell.
///
/// ```rust
/// use finsheet_core::format::parse_number;
///
/// assert_eq!(parse_number("(1,093)"), Some(-1093.0));
/// assert_eq!(parse_number("-12.5"), Some(-12.5));
/// assert_eq!(parse_number("abc"), None);
/// assert_eq!(parse_number(""), None);
/// ```
pub fn parse_number(input: &str) -> Option<f64> {
    let mut cleaned = input.trim();
    if cleaned.is_empty() {
        return None;
    }

    let mut negative = false;
    if cleaned.len() >= 2 && cleaned.starts_with('(') && cleaned.ends_with(')') {
        negative = true;
        cleaned = &cleaned[1..cleaned.len() - 1];
    } else if let Some(rest) = cleaned.strip_prefix('-') {
        negative = true;
        cleaned = rest;
    }

    let cleaned = cleaned.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "." || !regex_is_match!(r"^\d*\.?\d*$", cleaned) {
        return None;
    }

    let parsed: f64 = cleaned.parse().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    Some(if negative { -parsed } else { parsed })
}

/// Raw edit-buffer text for a value: unscaled, unseparated, full precision
pub fn format_for_editing(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => String::new(),
    }
}

/// Round to two decimal places (cents)
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a period end date for a column header
pub fn format_period_date(date: NaiveDate, format: DateFormat) -> String {
    date.format(format.pattern()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn opts(negative_format: NegativeFormat, display_scale: DisplayScale, decimal_places: u8) -> FormatOptions {
        FormatOptions {
            negative_format,
            display_scale,
            decimal_places,
        }
    }

    #[test]
    fn test_format_absent() {
        for scale in [DisplayScale::Units, DisplayScale::Thousands, DisplayScale::Millions] {
            for neg in [NegativeFormat::Parentheses, NegativeFormat::Minus] {
                assert_eq!(format_number(None, &opts(neg, scale, 2)), "");
            }
        }
    }

    #[test]
    fn test_format_negative_styles() {
        let paren = opts(NegativeFormat::Parentheses, DisplayScale::Units, 0);
        let minus = opts(NegativeFormat::Minus, DisplayScale::Units, 0);
        assert_eq!(format_number(Some(-1093.0), &paren), "(1,093)");
        assert_eq!(format_number(Some(-1093.0), &minus), "-1,093");
        assert_eq!(format_number(Some(1093.0), &paren), "1,093");
    }

    #[test]
    fn test_format_scales() {
        let thousands = opts(NegativeFormat::Parentheses, DisplayScale::Thousands, 1);
        assert_eq!(format_number(Some(1093.0), &thousands), "1.1");

        let millions = opts(NegativeFormat::Parentheses, DisplayScale::Millions, 2);
        assert_eq!(format_number(Some(9_990_000.0), &millions), "9.99");
        assert_eq!(format_number(Some(-1_450_000.0), &millions), "(1.45)");

        let units = opts(NegativeFormat::Minus, DisplayScale::Units, 0);
        assert_eq!(format_number(Some(1_234_567_890.0), &units), "1,234,567,890");
    }

    #[test]
    fn test_format_rounding_half_away_from_zero() {
        let o = opts(NegativeFormat::Minus, DisplayScale::Units, 0);
        assert_eq!(format_number(Some(2.5), &o), "3");
        assert_eq!(format_number(Some(-2.5), &o), "-3");
        assert_eq!(format_number(Some(999.5), &o), "1,000");
    }

    #[test]
    fn test_zero_is_never_negative() {
        let o = opts(NegativeFormat::Parentheses, DisplayScale::Units, 0);
        assert_eq!(format_number(Some(0.0), &o), "0");
        assert_eq!(format_number(Some(-0.0), &o), "0");
        assert_eq!(format_number(Some(-0.4), &o), "0");
    }

    #[test]
    fn test_format_decimals_padded() {
        let o = opts(NegativeFormat::Minus, DisplayScale::Units, 2);
        assert_eq!(format_number(Some(1234.5), &o), "1,234.50");
        assert_eq!(format_number(Some(0.07), &o), "0.07");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse_number("(1,093)"), Some(-1093.0));
        assert_eq!(parse_number("1,093"), Some(1093.0));
        assert_eq!(parse_number("  42  "), Some(42.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("-0"), Some(-0.0));
        // Space inside the sign or the parentheses is tolerated
        assert_eq!(parse_number("- 5"), Some(-5.0));
        assert_eq!(parse_number("( 1,250 )"), Some(-1250.0));
        assert_eq!(parse_number("1 250"), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("()"), None);
        assert_eq!(parse_number("(-5)"), None);
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number("1e5"), None);
        assert_eq!(parse_number("$100"), None);
    }

    #[test]
    fn test_format_for_editing_ignores_display_settings() {
        assert_eq!(format_for_editing(None), "");
        assert_eq!(format_for_editing(Some(1093.0)), "1093");
        assert_eq!(format_for_editing(Some(-1450000.0)), "-1450000");
        assert_eq!(format_for_editing(Some(0.125)), "0.125");
    }

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(10.456), 10.46);
        assert_eq!(round_to_cents(-10.454), -10.45);
        assert_eq!(round_to_cents(7.0), 7.0);
    }

    #[test]
    fn test_format_period_date() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(format_period_date(date, DateFormat::MonthDayYear), "12/31/2024");
        assert_eq!(format_period_date(date, DateFormat::MonthDayShortYear), "12/31/24");
        assert_eq!(format_period_date(date, DateFormat::MonthShortYear), "12/24");
    }

    proptest! {
        #[test]
        fn prop_edit_buffer_round_trips(int_part in 0u64..10_000_000_000, frac in "[0-9]{0,6}", negative in any::<bool>()) {
            let text = if frac.is_empty() {
                format!("{}{}", if negative { "-" } else { "" }, int_part)
            } else {
                format!("{}{}.{}", if negative { "-" } else { "" }, int_part, frac)
            };
            let parsed = parse_number(&text);
            prop_assert!(parsed.is_some());
            prop_assert_eq!(parse_number(&format_for_editing(parsed)), parsed);
        }

        #[test]
        fn prop_any_finite_value_round_trips(v in -1e15f64..1e15f64) {
            prop_assert_eq!(parse_number(&format_for_editing(Some(v))), Some(v));
        }
    }
}
