//! Composite cell keys
//!
//! Values, highlights and comments are all addressed by the same string key:
//! the line item code and the period id joined by [`KEY_DELIMITER`]. The field
//! order and the join character are part of the external contract, since
//! cascading deletes match on the row portion and the period portion of the key.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Character joining the line item code and the period id
pub const KEY_DELIMITER: char = '|';

/// A `line_item_code|period_id` key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CellKey(String);

impl CellKey {
    /// Join a line item code and a period id
    ///
    /// Neither component may contain [`KEY_DELIMITER`]; the statement checks
    /// this when rows and periods are created.
    ///
    /// ```rust
    /// use finsheet_core::CellKey;
    ///
    /// let key = CellKey::new("Asset.Current.Cash", "2024-12-31");
    /// assert_eq!(key.as_str(), "Asset.Current.Cash|2024-12-31");
    /// assert_eq!(key.line_item_code(), "Asset.Current.Cash");
    /// assert_eq!(key.period_id(), "2024-12-31");
    /// ```
    pub fn new(line_item_code: &str, period_id: &str) -> Self {
        let mut s = String::with_capacity(line_item_code.len() + period_id.len() + 1);
        s.push_str(line_item_code);
        s.push(KEY_DELIMITER);
        s.push_str(period_id);
        CellKey(s)
    }

    /// Parse a joined key, requiring exactly one delimiter and two non-empty parts
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once(KEY_DELIMITER) {
            Some((code, period))
                if !code.is_empty() && !period.is_empty() && !period.contains(KEY_DELIMITER) =>
            {
                Ok(CellKey(s.to_string()))
            }
            _ => Err(Error::InvalidKey(s.to_string())),
        }
    }

    /// The joined key string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Row portion of the key
    pub fn line_item_code(&self) -> &str {
        self.split().0
    }

    /// Period portion of the key
    pub fn period_id(&self) -> &str {
        self.split().1
    }

    /// True if the row portion equals `line_item_code`
    pub fn belongs_to_line_item(&self, line_item_code: &str) -> bool {
        self.0
            .strip_prefix(line_item_code)
            .map_or(false, |rest| rest.starts_with(KEY_DELIMITER))
    }

    /// True if the period portion equals `period_id`
    pub fn belongs_to_period(&self, period_id: &str) -> bool {
        self.0
            .strip_suffix(period_id)
            .map_or(false, |rest| rest.ends_with(KEY_DELIMITER))
    }

    /// Same line item, different period
    pub fn with_period(&self, period_id: &str) -> Self {
        CellKey::new(self.line_item_code(), period_id)
    }

    fn split(&self) -> (&str, &str) {
        self.0
            .split_once(KEY_DELIMITER)
            .unwrap_or((self.0.as_str(), ""))
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CellKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CellKey::parse(s)
    }
}

impl AsRef<str> for CellKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check that a line item code or period id can be used as a key component
pub fn validate_key_component(component: &str) -> Result<()> {
    if component.is_empty() || component.contains(KEY_DELIMITER) {
        return Err(Error::InvalidKey(component.to_string()));
    }
    Ok(())
}
