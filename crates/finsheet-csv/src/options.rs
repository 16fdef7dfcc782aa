//! Reader and writer settings

/// Delimiter and quote character of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvDialect {
    pub delimiter: u8,
    pub quote: u8,
}

impl Default for CsvDialect {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl CsvDialect {
    /// Comma-separated, double-quoted
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Settings for reading value files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvReadOptions {
    pub dialect: CsvDialect,
    /// First line names the columns (default: true)
    pub has_header: bool,
    /// Log and skip bad lines instead of failing (default: false)
    pub skip_invalid: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            dialect: CsvDialect::default(),
            has_header: true,
            skip_invalid: false,
        }
    }
}

/// Settings for writing value files and grid exports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvWriteOptions {
    pub dialect: CsvDialect,
    /// Write the header line(s) (default: true)
    pub write_header: bool,
    pub line_terminator: LineTerminator,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            dialect: CsvDialect::default(),
            write_header: true,
            line_terminator: LineTerminator::default(),
        }
    }
}

/// End of record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineTerminator {
    #[default]
    LF,
    CRLF,
}

impl LineTerminator {
    pub(crate) fn to_csv(self) -> csv::Terminator {
        match self {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        }
    }
}
