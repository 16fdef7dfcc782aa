//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use finsheet_core::{format_for_editing, ValueStore};
use finsheet_grid::RenderedGrid;

use crate::error::CsvResult;
use crate::options::CsvWriteOptions;
use crate::VALUE_HEADER;

/// Spaces per indent level in exported labels
const INDENT: &str = "  ";

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    fn builder(options: &CsvWriteOptions) -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(options.dialect.delimiter)
            .quote(options.dialect.quote)
            .terminator(options.line_terminator.to_csv())
            .flexible(true);
        builder
    }

    /// Write a value store to a long-format file
    pub fn write_values_file<P: AsRef<Path>>(
        values: &ValueStore,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write_values(values, file, options)
    }

    /// Write one `line_item_code,period_id,value` record per stored value
    ///
    /// Values are written at full precision, in key order.
    pub fn write_values<W: Write>(
        values: &ValueStore,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let mut csv_writer = Self::builder(options).from_writer(writer);
        if options.write_header {
            csv_writer.write_record(VALUE_HEADER)?;
        }
        for (key, value) in values.iter() {
            csv_writer.write_record([
                key.line_item_code(),
                key.period_id(),
                format_for_editing(Some(*value)).as_str(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Export a rendered grid to a file
    pub fn write_grid_file<P: AsRef<Path>>(
        grid: &RenderedGrid,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write_grid(grid, file, options)
    }

    /// Export a rendered grid as a wide table
    ///
    /// Headers are the period numbers, the period labels and their
    /// Active/Inactive status. Each line item follows with its number,
    /// code, indented label and the formatted cell text per column.
    pub fn write_grid<W: Write>(
        grid: &RenderedGrid,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let mut csv_writer = Self::builder(options).from_writer(writer);

        if options.write_header {
            let lead = |title: &str| vec![String::new(), String::new(), title.to_string()];

            let mut numbers = lead("Period");
            numbers.extend(grid.columns.iter().map(|c| c.number.to_string()));
            csv_writer.write_record(&numbers)?;

            let mut labels = vec!["No.".to_string(), "Code".to_string(), "Line Item".to_string()];
            labels.extend(grid.columns.iter().map(|c| c.label()));
            csv_writer.write_record(&labels)?;

            let mut status = lead("Status");
            status.extend(grid.columns.iter().map(|c| c.status().to_string()));
            csv_writer.write_record(&status)?;
        }

        for row in &grid.rows {
            let mut record = vec![
                row.number.map(|n| n.to_string()).unwrap_or_default(),
                row.line_item_code.clone(),
                format!("{}{}", INDENT.repeat(row.indent_level as usize), row.label),
            ];
            record.extend(row.cells.iter().map(|c| c.text.clone()));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
