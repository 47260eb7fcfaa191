use std::path::Path;

use tracing::{debug, info, instrument};

use crate::sales::report::clean::clean;
use crate::sales::report::error::Result;
use crate::sales::report::io::{csv_read, excel_write};
use crate::sales::report::summary::{Summary, summarize};

/// Figures describing a completed report run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Rows loaded from the CSV source.
    pub raw_rows: usize,
    /// Malformed rows the loader dropped.
    pub skipped_rows: usize,
    /// Rows left after cleaning.
    pub clean_rows: usize,
    /// Totals written to the summary sheet.
    pub summary: Summary,
}

/// Loads, cleans and summarizes a sales CSV, then writes the xlsx report.
///
/// Every fallible step before the write runs first, so a missing or unreadable
/// input, or a table lacking the summary columns, leaves `output` untouched.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn generate_report(input: &Path, output: &Path) -> Result<RunSummary> {
    let loaded = csv_read::read_records(input)?;
    let raw_rows = loaded.table.len();

    let table = clean(loaded.table);
    let summary = summarize(&table)?;
    debug!(regions = summary.rows.len(), "summary ready");

    excel_write::write_report(output, &table, &summary)?;
    info!("report saved to {}", output.display());

    Ok(RunSummary {
        raw_rows,
        skipped_rows: loaded.skipped_rows,
        clean_rows: table.len(),
        summary,
    })
}
