//! # finsheet-csv
//!
//! CSV import and export for finsheet.
//!
//! - long-format value files: `line_item_code,period_id,value`, one cell per line
//! - wide-format export of a [`RenderedGrid`](finsheet_grid::RenderedGrid)

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult, ValueField};
pub use options::{CsvDialect, CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;

/// Header of long-format value files
pub const VALUE_HEADER: [&str; 3] = ["line_item_code", "period_id", "value"];
