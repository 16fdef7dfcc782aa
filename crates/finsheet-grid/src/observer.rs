//! Change notifications
//!
//! Every commit produces exactly one [`Notification::CellsChanged`]; every
//! structural or annotation mutation produces one notification naming the
//! affected identifiers. Hosts persist changes by implementing
//! [`GridObserver`].

use std::fmt;

use chrono::NaiveDate;
use finsheet_core::{CellChange, CellHighlight, CellKey, InsertMode};

/// Something that changed in the statement
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Values written by one commit
    CellsChanged(Vec<CellChange>),
    RowInserted {
        index: usize,
        line_item_code: String,
    },
    RowDeleted {
        index: usize,
        line_item_code: String,
    },
    RowMoved {
        line_item_code: String,
        from: usize,
        to: usize,
    },
    PeriodAdded {
        period_id: String,
        period_end: NaiveDate,
    },
    /// A period was removed, by id or from the end
    PeriodDeleted {
        period_id: String,
    },
    PeriodCleared {
        period_id: String,
        values_removed: usize,
    },
    ColumnInserted {
        period_id: String,
        reference_id: String,
        mode: InsertMode,
    },
    ActiveToggled {
        period_id: String,
        is_active: bool,
    },
    InclusionChanged {
        period_id: String,
        is_included: bool,
    },
    /// `None` once the cell carries no highlight
    HighlightChanged {
        key: CellKey,
        highlight: Option<CellHighlight>,
    },
    /// `None` once the comment is removed
    CommentChanged {
        key: CellKey,
        comment: Option<String>,
    },
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::CellsChanged(changes) => {
                write!(f, "cells changed:")?;
                for change in changes {
                    write!(
                        f,
                        " {} {} -> {}",
                        change.key(),
                        fmt_value(change.old_value),
                        fmt_value(change.new_value)
                    )?;
                }
                Ok(())
            }
            Notification::RowInserted {
                index,
                line_item_code,
            } => write!(f, "row inserted: {} at {}", line_item_code, index),
            Notification::RowDeleted {
                index,
                line_item_code,
            } => write!(f, "row deleted: {} from {}", line_item_code, index),
            Notification::RowMoved {
                line_item_code,
                from,
                to,
            } => write!(f, "row moved: {} {} -> {}", line_item_code, from, to),
            Notification::PeriodAdded {
                period_id,
                period_end,
            } => write!(f, "period added: {} ending {}", period_id, period_end),
            Notification::PeriodDeleted { period_id } => write!(f, "period deleted: {}", period_id),
            Notification::PeriodCleared {
                period_id,
                values_removed,
            } => write!(f, "period cleared: {} ({} values)", period_id, values_removed),
            Notification::ColumnInserted {
                period_id,
                reference_id,
                mode,
            } => write!(
                f,
                "column inserted: {} from {} ({:?})",
                period_id, reference_id, mode
            ),
            Notification::ActiveToggled {
                period_id,
                is_active,
            } => write!(f, "period {} active = {}", period_id, is_active),
            Notification::InclusionChanged {
                period_id,
                is_included,
            } => write!(f, "period {} included = {}", period_id, is_included),
            Notification::HighlightChanged { key, highlight } => match highlight {
                Some(highlight) => write!(f, "highlight {}: {}", key, highlight),
                None => write!(f, "highlight {}: cleared", key),
            },
            Notification::CommentChanged { key, comment } => match comment {
                Some(comment) => write!(f, "comment {}: {:?}", key, comment),
                None => write!(f, "comment {}: removed", key),
            },
        }
    }
}

/// Receives grid notifications
pub trait GridObserver {
    fn notify(&mut self, notification: &Notification);
}

/// Records every notification
impl GridObserver for Vec<Notification> {
    fn notify(&mut self, notification: &Notification) {
        self.push(notification.clone());
    }
}

/// Discards every notification
impl GridObserver for () {
    fn notify(&mut self, _notification: &Notification) {}
}

impl<O: GridObserver + ?Sized> GridObserver for &mut O {
    fn notify(&mut self, notification: &Notification) {
        (**self).notify(notification)
    }
}

impl<O: GridObserver + ?Sized> GridObserver for Box<O> {
    fn notify(&mut self, notification: &Notification) {
        (**self).notify(notification)
    }
}
