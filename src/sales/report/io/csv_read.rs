use std::collections::HashSet;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use tracing::{debug, info};

use crate::sales::report::error::{ReportError, Result};
use crate::sales::report::model::{CellValue, RecordTable};

/// Field values treated as missing, matching what spreadsheet exports and
/// pandas-style tooling commonly emit.
pub const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Table produced by the loader together with the number of rows it dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    pub table: RecordTable,
    pub skipped_rows: usize,
}

/// Loads a CSV file into a [`RecordTable`].
///
/// A path that cannot be opened yields [`ReportError::SourceNotFound`]; a file
/// without a usable header yields [`ReportError::CorruptFormat`]. Rows that do
/// not fit the header are skipped.
pub fn read_records(path: &Path) -> Result<LoadedTable> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(error)
            if matches!(
                error.kind(),
                ErrorKind::NotFound | ErrorKind::PermissionDenied
            ) =>
        {
            return Err(ReportError::SourceNotFound(path.to_path_buf()));
        }
        Err(error) => return Err(error.into()),
    };
    if !file.metadata()?.is_file() {
        return Err(ReportError::SourceNotFound(path.to_path_buf()));
    }

    let loaded = read_records_from(file)?;
    info!(
        rows = loaded.table.len(),
        skipped = loaded.skipped_rows,
        "loaded raw rows from {}",
        path.display()
    );
    Ok(loaded)
}

/// Loads CSV data from any reader. The first record is the header.
pub fn read_records_from<R: Read>(reader: R) -> Result<LoadedTable> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header = csv_reader.byte_headers().map_err(header_error)?.clone();
    let columns = parse_header(&header)?;
    let width = columns.len();

    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    let mut skipped_rows = 0usize;

    for (index, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(error) if error.is_io_error() => return Err(error.into()),
            Err(error) => {
                debug!(row = index + 2, %error, "skipping undecodable row");
                skipped_rows += 1;
                continue;
            }
        };

        if record.len() > width {
            debug!(
                row = index + 2,
                fields = record.len(),
                expected = width,
                "skipping row with too many fields"
            );
            skipped_rows += 1;
            continue;
        }

        let mut row: Vec<Option<String>> = record.iter().map(null_or_text).collect();
        row.resize(width, None);
        raw_rows.push(row);
    }

    let numeric_columns: Vec<bool> = (0..width)
        .map(|col_idx| is_numeric_column(&raw_rows, col_idx))
        .collect();

    let mut table = RecordTable::new(columns);
    for raw_row in raw_rows {
        let row = raw_row
            .into_iter()
            .zip(&numeric_columns)
            .map(|(field, numeric)| to_cell(field, *numeric))
            .collect();
        table.push_row(row);
    }

    Ok(LoadedTable {
        table,
        skipped_rows,
    })
}

fn header_error(error: csv::Error) -> ReportError {
    if error.is_io_error() {
        ReportError::Csv(error)
    } else {
        ReportError::CorruptFormat(format!("unreadable header row: {error}"))
    }
}

fn parse_header(header: &ByteRecord) -> Result<Vec<String>> {
    if header.is_empty() {
        return Err(ReportError::CorruptFormat("missing header row".into()));
    }

    let mut raw_names = Vec::with_capacity(header.len());
    for (index, field) in header.iter().enumerate() {
        if field.contains(&0) {
            return Err(ReportError::CorruptFormat("header contains binary data".into()));
        }
        let name = std::str::from_utf8(field).map_err(|_| {
            ReportError::CorruptFormat(format!("header field {index} is not valid UTF-8"))
        })?;
        raw_names.push(name.to_string());
    }

    Ok(unique_column_names(raw_names))
}

/// Names blank header cells `Unnamed: N` and suffixes repeats with `.1`, `.2`, ...
fn unique_column_names(raw_names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(raw_names.len());

    for (index, raw) in raw_names.into_iter().enumerate() {
        let base = if raw.is_empty() {
            format!("Unnamed: {index}")
        } else {
            raw
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }

    names
}

fn null_or_text(field: &str) -> Option<String> {
    if NULL_MARKERS.contains(&field) {
        None
    } else {
        Some(field.to_string())
    }
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|number| number.is_finite())
}

fn is_numeric_column(rows: &[Vec<Option<String>>], col_idx: usize) -> bool {
    let mut values = rows
        .iter()
        .filter_map(|row| row[col_idx].as_deref())
        .peekable();
    values.peek().is_some() && values.all(|value| parse_finite(value).is_some())
}

fn to_cell(field: Option<String>, numeric: bool) -> CellValue {
    match field {
        None => CellValue::Null,
        Some(value) if numeric => parse_finite(&value)
            .map(CellValue::Number)
            .unwrap_or(CellValue::Text(value)),
        Some(value) => CellValue::Text(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(source: &str) -> LoadedTable {
        read_records_from(source.as_bytes()).expect("CSV loaded")
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_skipped() {
        let loaded =
            load("Region,Total Sales,Status\nnorth,10,open\nsouth,20\neast,30,closed,extra\n");

        assert_eq!(loaded.table.len(), 2);
        assert_eq!(loaded.skipped_rows, 1);
        assert_eq!(loaded.table.rows[1][2], CellValue::Null);
    }

    #[test]
    fn numeric_columns_are_inferred() {
        let loaded = load("Qty,Total Sales\n3,$10\n4,20\n,30\n");

        assert_eq!(loaded.table.rows[0][0], CellValue::Number(3.0));
        assert_eq!(loaded.table.rows[2][0], CellValue::Null);
        assert_eq!(loaded.table.rows[0][1], CellValue::Text("$10".into()));
    }

    #[test]
    fn null_markers_become_null() {
        let loaded = load("Region,Status\nN/A,NULL\n,shipped\n");

        assert_eq!(loaded.table.rows[0], vec![CellValue::Null, CellValue::Null]);
        assert_eq!(loaded.table.rows[1][0], CellValue::Null);
    }

    #[test]
    fn header_names_are_made_unique() {
        let loaded = load("Region,,Region,Region.1\na,b,c,d\n");

        assert_eq!(
            loaded.table.columns,
            vec!["Region", "Unnamed: 1", "Region.1", "Region.1.1"]
        );
    }

    #[test]
    fn empty_source_is_corrupt() {
        let error = read_records_from("".as_bytes()).expect_err("empty input rejected");
        assert!(matches!(error, ReportError::CorruptFormat(_)));
    }

    #[test]
    fn binary_header_is_corrupt() {
        let error = read_records_from(&b"PK\x03\x04\x00\x00,\xff\xfe\n"[..])
            .expect_err("binary input rejected");
        assert!(matches!(error, ReportError::CorruptFormat(_)));
    }
}
