//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use finsheet_core::key::validate_key_component;
use finsheet_core::{parse_number, CellKey, ValueStore};
use log::{debug, warn};

use crate::error::{CsvError, CsvResult, ValueField};
use crate::options::CsvReadOptions;

/// Long-format value file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a value file
    pub fn read_values_file<P: AsRef<Path>>(
        path: P,
        options: &CsvReadOptions,
    ) -> CsvResult<ValueStore> {
        let file = File::open(path)?;
        Self::read_values(file, options)
    }

    /// Read `line_item_code,period_id,value` records into a value store
    ///
    /// Values go through the same parser as cell input, so `(1,093)` reads
    /// as -1093. A blank value field leaves the cell absent. When a key
    /// appears twice the later line wins.
    pub fn read_values<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<ValueStore> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.dialect.delimiter)
            .quote(options.dialect.quote)
            .has_headers(options.has_header)
            .flexible(true)
            .from_reader(reader);

        let mut values = ValueStore::new();
        for result in csv_reader.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line() as usize);

            match Self::parse_record(&record, line) {
                Ok(Some((key, value))) => {
                    if let Some(previous) = values.set_value(key.clone(), Some(value)) {
                        debug!("line {}: {} overrides {}", line, key, previous);
                    }
                }
                Ok(None) => {}
                Err(e) if options.skip_invalid => warn!("skipping {}", e),
                Err(e) => return Err(e),
            }
        }
        Ok(values)
    }

    fn parse_record(record: &csv::StringRecord, line: usize) -> CsvResult<Option<(CellKey, f64)>> {
        let get = |field: ValueField| record.get(field.column() - 1).map(str::trim).unwrap_or("");
        let code = get(ValueField::LineItemCode);
        let period_id = get(ValueField::PeriodId);
        let raw_value = get(ValueField::Value);

        for (field, component) in [(ValueField::LineItemCode, code), (ValueField::PeriodId, period_id)] {
            validate_key_component(component).map_err(|e| CsvError::Parse {
                line,
                field,
                message: e.to_string(),
            })?;
        }

        if raw_value.is_empty() {
            return Ok(None);
        }
        let value = parse_number(raw_value).ok_or_else(|| CsvError::Parse {
            line,
            field: ValueField::Value,
            message: format!("not a number: {:?}", raw_value),
        })?;
        Ok(Some((CellKey::new(code, period_id), value)))
    }
}
