//! Row (line item) types

use std::fmt;

/// Role of a row in the statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum RowType {
    /// Enterable line item
    #[default]
    Data,
    /// Subtotal line
    Subtotal,
    /// Total line
    Total,
    /// Section title spanning the grid
    SectionHeader,
    /// Visual gap
    Spacer,
}

impl RowType {
    /// Rows that receive a row number
    pub fn is_numbered(&self) -> bool {
        matches!(self, RowType::Data | RowType::Subtotal | RowType::Total)
    }

    /// Rows that show per-period cells
    pub fn has_cells(&self) -> bool {
        self.is_numbered()
    }

    /// Anything other than a data row
    pub fn is_structural(&self) -> bool {
        !matches!(self, RowType::Data)
    }
}

impl fmt::Display for RowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RowType::Data => "data",
            RowType::Subtotal => "subtotal",
            RowType::Total => "total",
            RowType::SectionHeader => "sectionHeader",
            RowType::Spacer => "spacer",
        };
        f.write_str(name)
    }
}

/// A line item row
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowDefinition {
    /// Stable unique key
    pub line_item_code: String,
    /// Display label
    pub label: String,
    /// Row role
    pub row_type: RowType,
    /// Label indentation steps
    pub indent_level: u32,
    /// Whether cells accept input
    pub is_editable: bool,
}

impl RowDefinition {
    /// Editable data row
    pub fn data(code: impl Into<String>, label: impl Into<String>, indent_level: u32) -> Self {
        Self {
            line_item_code: code.into(),
            label: label.into(),
            row_type: RowType::Data,
            indent_level,
            is_editable: true,
        }
    }

    /// Read-only row of a structural type
    pub fn structural(code: impl Into<String>, label: impl Into<String>, row_type: RowType) -> Self {
        Self {
            line_item_code: code.into(),
            label: label.into(),
            row_type,
            indent_level: 0,
            is_editable: false,
        }
    }

    /// Set indentation
    pub fn with_indent(mut self, indent_level: u32) -> Self {
        self.indent_level = indent_level;
        self
    }

    /// Set editability
    pub fn with_editable(mut self, is_editable: bool) -> Self {
        self.is_editable = is_editable;
        self
    }

    /// Vertical navigation only stops on editable data rows
    pub fn is_navigable(&self) -> bool {
        self.row_type == RowType::Data && self.is_editable
    }
}

/// Where to insert relative to a reference row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowSide {
    /// Before the reference row
    Above,
    /// After the reference row
    Below,
}

/// Row move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveDirection {
    /// Toward index 0
    Up,
    /// Toward the end
    Down,
}
