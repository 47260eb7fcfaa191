use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Error type covering the failures that abort a report run.
///
/// Row-level and cell-level defects never show up here: malformed rows are
/// dropped by the loader and unparsable amounts or dates fall back to a fixed
/// value inside the cleaner.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the summary cannot be serialized to JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the CSV decoder that are not row-local.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Raised when the input path does not resolve to a readable file.
    #[error("input file not found: {0}")]
    SourceNotFound(PathBuf),

    /// Raised when the input cannot be read as delimited text at all.
    #[error("input is not readable as delimited text: {0}")]
    CorruptFormat(String),

    /// Raised when the summary needs a column the cleaned table lacks.
    #[error("cannot build summary: column '{0}' is missing")]
    MissingAggregationColumn(String),

    /// Raised when the cleaned table does not fit on an Excel worksheet.
    #[error("table of {rows} rows and {columns} columns exceeds the worksheet limits")]
    SheetTooLarge { rows: usize, columns: usize },

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
