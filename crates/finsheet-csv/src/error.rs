//! CSV error types

use std::fmt;

use thiserror::Error;

pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors raised while importing or exporting values
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A record whose field cannot become a cell entry
    #[error("line {line}: bad {field}: {message}")]
    Parse {
        /// 1-based line in the file
        line: usize,
        field: ValueField,
        message: String,
    },
}

/// Columns of a long-format value file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueField {
    LineItemCode,
    PeriodId,
    Value,
}

impl ValueField {
    /// 1-based column
    pub fn column(&self) -> usize {
        match self {
            ValueField::LineItemCode => 1,
            ValueField::PeriodId => 2,
            ValueField::Value => 3,
        }
    }

    /// Header name
    pub fn name(&self) -> &'static str {
        crate::VALUE_HEADER[self.column() - 1]
    }
}

impl fmt::Display for ValueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
