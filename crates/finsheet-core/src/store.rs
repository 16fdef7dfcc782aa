//! Sparse cell storage
//!
//! Only cells that carry something are stored. Blank cells, default
//! highlights and empty comments have no entry at all, so absence and zero
//! stay distinct.
//!
//! Structure: `BTreeMap<CellKey, V>`. Ordered iteration keeps exports and
//! change lists deterministic.

use std::collections::BTreeMap;

use crate::key::CellKey;

/// One committed value change
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellChange {
    /// Row portion of the key
    pub line_item_code: String,
    /// Period portion of the key
    pub period_id: String,
    /// Value before the commit (None = blank)
    pub old_value: Option<f64>,
    /// Value after the commit (None = blank)
    pub new_value: Option<f64>,
}

impl CellChange {
    /// Create a change record
    pub fn new(
        line_item_code: impl Into<String>,
        period_id: impl Into<String>,
        old_value: Option<f64>,
        new_value: Option<f64>,
    ) -> Self {
        Self {
            line_item_code: line_item_code.into(),
            period_id: period_id.into(),
            old_value,
            new_value,
        }
    }

    /// Composite key addressed by this change
    pub fn key(&self) -> CellKey {
        CellKey::new(&self.line_item_code, &self.period_id)
    }

    /// True if applying the change would leave the cell as it was
    pub fn is_noop(&self) -> bool {
        self.old_value == self.new_value
    }
}

/// Sparse map from [`CellKey`] to a per-cell payload
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CellMap<V> {
    entries: BTreeMap<CellKey, V>,
}

/// Numeric cell values
pub type ValueStore = CellMap<f64>;

impl<V> CellMap<V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the entry for a row and period
    pub fn get(&self, line_item_code: &str, period_id: &str) -> Option<&V> {
        self.entries.get(&CellKey::new(line_item_code, period_id))
    }

    /// Get the entry for a key
    pub fn get_by_key(&self, key: &CellKey) -> Option<&V> {
        self.entries.get(key)
    }

    /// Check if a key has an entry
    pub fn contains(&self, key: &CellKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert or replace an entry, returning the previous one
    pub fn insert(&mut self, key: CellKey, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Remove an entry, returning it
    pub fn remove(&mut self, key: &CellKey) -> Option<V> {
        self.entries.remove(key)
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate over entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&CellKey, &V)> {
        self.entries.iter()
    }

    /// Iterate over keys in key order
    pub fn keys(&self) -> impl Iterator<Item = &CellKey> {
        self.entries.keys()
    }

    /// Remove every entry whose row portion is `line_item_code`
    ///
    /// Returns the number of entries removed.
    pub fn remove_line_item(&mut self, line_item_code: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|key, _| !key.belongs_to_line_item(line_item_code));
        before - self.entries.len()
    }

    /// Remove every entry whose period portion is `period_id`
    ///
    /// Returns the number of entries removed.
    pub fn remove_period(&mut self, period_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.belongs_to_period(period_id));
        before - self.entries.len()
    }

    /// Entries of a single period, in key order
    pub fn period_entries<'a>(
        &'a self,
        period_id: &'a str,
    ) -> impl Iterator<Item = (&'a CellKey, &'a V)> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key.belongs_to_period(period_id))
    }
}

impl<V: Clone> CellMap<V> {
    /// Copy every entry of period `from` into period `to`
    ///
    /// Existing entries of `to` for the same rows are overwritten. Returns the
    /// number of entries copied.
    pub fn copy_period(&mut self, from: &str, to: &str) -> usize {
        let copies: Vec<(CellKey, V)> = self
            .period_entries(from)
            .map(|(key, value)| (key.with_period(to), value.clone()))
            .collect();
        let count = copies.len();
        self.entries.extend(copies);
        count
    }
}

impl<V> Default for CellMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(CellKey, V)> for CellMap<V> {
    fn from_iter<I: IntoIterator<Item = (CellKey, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl CellMap<f64> {
    /// Get the numeric value for a row and period
    pub fn value(&self, line_item_code: &str, period_id: &str) -> Option<f64> {
        self.get(line_item_code, period_id).copied()
    }

    /// Set or clear a single value, returning the previous one
    pub fn set_value(&mut self, key: CellKey, value: Option<f64>) -> Option<f64> {
        match value {
            Some(v) => self.insert(key, v),
            None => self.remove(&key),
        }
    }

    /// Apply one commit's worth of changes
    ///
    /// Each change sets its `new_value` or deletes the entry when it is None.
    /// Callers pass every change of a single user action in one call.
    pub fn apply_changes(&mut self, changes: &[CellChange]) {
        for change in changes {
            self.set_value(change.key(), change.new_value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ValueStore {
        let mut store = ValueStore::new();
        store.insert(CellKey::new("Cash", "P1"), 100.0);
        store.insert(CellKey::new("Cash", "P2"), 110.0);
        store.insert(CellKey::new("AR", "P1"), 50.0);
        store.insert(CellKey::new("AR", "P2"), 0.0);
        store.insert(CellKey::new("CashEquivalents", "P1"), 7.0);
        store
    }

    #[test]
    fn test_get_distinguishes_zero_from_absent() {
        let store = sample();
        assert_eq!(store.value("AR", "P2"), Some(0.0));
        assert_eq!(store.value("AR", "P3"), None);
    }

    #[test]
    fn test_apply_changes() {
        let mut store = sample();
        store.apply_changes(&[
            CellChange::new("Cash", "P1", Some(100.0), Some(125.5)),
            CellChange::new("AR", "P1", Some(50.0), None),
            CellChange::new("Inventory", "P1", None, Some(0.0)),
        ]);

        assert_eq!(store.value("Cash", "P1"), Some(125.5));
        assert_eq!(store.value("AR", "P1"), None);
        assert_eq!(store.value("Inventory", "P1"), Some(0.0));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_remove_line_item_is_exact() {
        let mut store = sample();
        assert_eq!(store.remove_line_item("Cash"), 2);
        assert_eq!(store.value("CashEquivalents", "P1"), Some(7.0));
        assert_eq!(store.value("AR", "P1"), Some(50.0));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_remove_period() {
        let mut store = sample();
        assert_eq!(store.remove_period("P1"), 3);
        let keys: Vec<&str> = store.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["AR|P2", "Cash|P2"]);
    }

    #[test]
    fn test_copy_period() {
        let mut store = sample();
        assert_eq!(store.copy_period("P2", "P2-v2"), 2);
        assert_eq!(store.value("Cash", "P2-v2"), Some(110.0));
        assert_eq!(store.value("AR", "P2-v2"), Some(0.0));
        assert_eq!(store.value("CashEquivalents", "P2-v2"), None);
    }

    #[test]
    fn test_change_noop() {
        assert!(CellChange::new("a", "b", None, None).is_noop());
        assert!(CellChange::new("a", "b", Some(1.0), Some(1.0)).is_noop());
        assert!(!CellChange::new("a", "b", Some(0.0), None).is_noop());
    }
}
