//! Fixed normalization passes applied to a loaded sales table.
//!
//! [`clean`] runs the passes in order. Every pass is a no-op for columns the
//! table does not have, and extra columns pass through untouched. The row
//! passes run a second time at the end because normalization can turn distinct
//! rows into identical ones (` bob ` and `bob`), and an unparsable date can
//! leave a row with nothing but nulls.

pub mod currency;
pub mod dates;
pub mod text;

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::sales::report::model::{
    CellValue, DATE, PRODUCT, REGION, RecordTable, SALES_REP, STATUS, TOTAL_SALES,
};

/// Columns normalized to trimmed title case.
pub const TEXT_COLUMNS: [&str; 4] = [SALES_REP, REGION, PRODUCT, STATUS];
/// Replacement for missing values in text columns other than Region.
pub const UNKNOWN: &str = "Unknown";
/// Replacement for a missing Region.
pub const REGION_FALLBACK: &str = "TBD";

/// Runs every cleaning pass over `table` and returns the cleaned table.
///
/// Running it again on its own output changes nothing.
#[instrument(level = "info", skip_all, fields(rows = table.len()))]
pub fn clean(mut table: RecordTable) -> RecordTable {
    remove_empty_rows(&mut table);
    remove_duplicate_rows(&mut table);
    normalize_text_columns(&mut table);
    fill_missing_regions(&mut table);
    coerce_total_sales(&mut table);
    coerce_dates(&mut table);
    remove_empty_rows(&mut table);
    remove_duplicate_rows(&mut table);
    info!(rows = table.len(), "rows remaining after cleaning");
    table
}

/// Drops rows in which every cell is null.
pub fn remove_empty_rows(table: &mut RecordTable) {
    let before = table.len();
    table.rows.retain(|row| !row.iter().all(CellValue::is_null));
    debug!(removed = before - table.len(), "removed empty rows");
}

/// Drops rows identical to an earlier row across all columns.
pub fn remove_duplicate_rows(table: &mut RecordTable) {
    let before = table.len();
    let mut seen: HashSet<Vec<CellKey>> = HashSet::with_capacity(table.len());
    table
        .rows
        .retain(|row| seen.insert(row.iter().map(CellKey::from).collect()));
    debug!(removed = before - table.len(), "removed duplicate rows");
}

/// Trims and title-cases the text columns, filling blanks with [`UNKNOWN`].
///
/// Blank Region cells are left null for [`fill_missing_regions`], and a Region
/// already holding [`REGION_FALLBACK`] keeps its casing.
pub fn normalize_text_columns(table: &mut RecordTable) {
    for column in TEXT_COLUMNS {
        let Some(index) = table.column_index(column) else {
            continue;
        };
        let is_region = column == REGION;

        for row in &mut table.rows {
            row[index] = normalize_text_cell(&row[index], is_region);
        }
    }
}

fn normalize_text_cell(cell: &CellValue, is_region: bool) -> CellValue {
    let rendered = cell.to_string();
    let trimmed = rendered.trim();
    match trimmed {
        "" if is_region => CellValue::Null,
        "" => CellValue::Text(UNKNOWN.to_string()),
        REGION_FALLBACK if is_region => CellValue::Text(REGION_FALLBACK.to_string()),
        _ => CellValue::Text(text::title_case(trimmed)),
    }
}

/// Replaces null Region cells with [`REGION_FALLBACK`].
pub fn fill_missing_regions(table: &mut RecordTable) {
    let Some(index) = table.column_index(REGION) else {
        return;
    };
    for row in &mut table.rows {
        if row[index].is_null() {
            row[index] = CellValue::Text(REGION_FALLBACK.to_string());
        }
    }
}

/// Converts Total Sales cells into non-negative numbers, using zero for
/// anything that is not a readable amount.
pub fn coerce_total_sales(table: &mut RecordTable) {
    let Some(index) = table.column_index(TOTAL_SALES) else {
        return;
    };
    for row in &mut table.rows {
        let amount = match &row[index] {
            CellValue::Number(value) => currency::sanitize_amount(*value),
            other => currency::parse_amount(&other.to_string()),
        };
        row[index] = CellValue::Number(amount);
    }
}

/// Converts Date cells into calendar dates, using null for anything that is
/// not a readable date.
pub fn coerce_dates(table: &mut RecordTable) {
    let Some(index) = table.column_index(DATE) else {
        return;
    };
    for row in &mut table.rows {
        row[index] = match &row[index] {
            CellValue::Date(date) => CellValue::Date(*date),
            CellValue::Null => CellValue::Null,
            other => dates::parse_date(&other.to_string())
                .map(CellValue::Date)
                .unwrap_or(CellValue::Null),
        };
    }
}

/// Hashable mirror of [`CellValue`] used for duplicate detection.
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey {
    Text(String),
    Number(u64),
    Date(NaiveDate),
    Null,
}

impl From<&CellValue> for CellKey {
    fn from(cell: &CellValue) -> Self {
        match cell {
            CellValue::Text(value) => CellKey::Text(value.clone()),
            CellValue::Number(value) => CellKey::Number((value + 0.0).to_bits()),
            CellValue::Date(value) => CellKey::Date(*value),
            CellValue::Null => CellKey::Null,
        }
    }
}
