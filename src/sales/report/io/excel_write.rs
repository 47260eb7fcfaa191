use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{Color, ExcelDateTime, Format, FormatBorder, Workbook, Worksheet};
use tracing::debug;

use crate::sales::report::error::{ReportError, Result};
use crate::sales::report::model::{CellValue, RecordTable, TOTAL_SALES};
use crate::sales::report::summary::Summary;

/// Sheet holding every cleaned record.
pub const CLEAN_DATA_SHEET: &str = "Clean Data";
/// Sheet holding the per-region totals.
pub const SUMMARY_SHEET: &str = "Summary Report";
/// Number format applied to sales amounts.
pub const CURRENCY_FORMAT: &str = "$#,##0.00";
/// Number format applied to dates.
pub const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Longest text Excel stores in one cell; longer values are truncated.
pub const MAX_CELL_CHARS: usize = 32_767;
/// Worksheet capacity, header row included.
pub const MAX_SHEET_ROWS: usize = 1_048_576;
pub const MAX_SHEET_COLUMNS: usize = 16_384;

const COLUMN_WIDTH: f64 = 20.0;
const SALES_COLUMN_WIDTH: f64 = 15.0;

struct ReportFormats {
    header: Format,
    currency: Format,
    date: Format,
}

impl ReportFormats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_background_color(Color::RGB(0x4F81BD))
                .set_font_color(Color::White)
                .set_border(FormatBorder::Thin),
            currency: Format::new().set_num_format(CURRENCY_FORMAT),
            date: Format::new().set_num_format(DATE_FORMAT),
        }
    }
}

/// Writes the cleaned table and its summary as a two-sheet workbook.
///
/// The workbook is rendered in memory and moved onto `path` only once the
/// bytes are on disk, so a failure never leaves a truncated report behind.
pub fn write_report(path: &Path, table: &RecordTable, summary: &Summary) -> Result<()> {
    let mut workbook = build_report(table, summary)?;
    let buffer = workbook.save_to_buffer()?;
    debug!(bytes = buffer.len(), "workbook rendered");
    persist(path, &buffer)
}

/// Builds the report workbook without saving it.
pub fn build_report(table: &RecordTable, summary: &Summary) -> Result<Workbook> {
    let formats = ReportFormats::new();
    let mut workbook = Workbook::new();

    let data_sheet = workbook.add_worksheet();
    data_sheet.set_name(CLEAN_DATA_SHEET)?;
    write_clean_data(data_sheet, table, &formats)?;

    let summary_sheet = workbook.add_worksheet();
    summary_sheet.set_name(SUMMARY_SHEET)?;
    write_summary(summary_sheet, summary, &formats)?;

    Ok(workbook)
}

fn write_clean_data(
    worksheet: &mut Worksheet,
    table: &RecordTable,
    formats: &ReportFormats,
) -> Result<()> {
    let too_large = || ReportError::SheetTooLarge {
        rows: table.len(),
        columns: table.columns.len(),
    };
    if table.len() >= MAX_SHEET_ROWS || table.columns.len() > MAX_SHEET_COLUMNS {
        return Err(too_large());
    }
    let sales_idx = table.column_index(TOTAL_SALES);

    for (col_idx, header) in table.columns.iter().enumerate() {
        let col = u16::try_from(col_idx).map_err(|_| too_large())?;
        worksheet.write_string_with_format(0, col, excel_text(header), &formats.header)?;
        let width = if Some(col_idx) == sales_idx {
            SALES_COLUMN_WIDTH
        } else {
            COLUMN_WIDTH
        };
        worksheet.set_column_width(col, width)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let excel_row = u32::try_from(row_idx + 1).map_err(|_| too_large())?;
        for (col_idx, cell) in row.iter().enumerate() {
            let col = u16::try_from(col_idx).map_err(|_| too_large())?;
            match cell {
                CellValue::Text(value) => {
                    worksheet.write_string(excel_row, col, excel_text(value))?;
                }
                CellValue::Number(value) if Some(col_idx) == sales_idx => {
                    worksheet.write_number_with_format(
                        excel_row,
                        col,
                        *value,
                        &formats.currency,
                    )?;
                }
                CellValue::Number(value) => {
                    worksheet.write_number(excel_row, col, *value)?;
                }
                CellValue::Date(date) => match to_excel_date(*date) {
                    Some(datetime) => {
                        worksheet.write_datetime_with_format(
                            excel_row,
                            col,
                            &datetime,
                            &formats.date,
                        )?;
                    }
                    None => {
                        worksheet.write_string(excel_row, col, cell.to_string())?;
                    }
                },
                CellValue::Null => {}
            }
        }
    }

    Ok(())
}

fn write_summary(
    worksheet: &mut Worksheet,
    summary: &Summary,
    formats: &ReportFormats,
) -> Result<()> {
    worksheet.write_string_with_format(0, 0, "Region", &formats.header)?;
    worksheet.write_string_with_format(0, 1, TOTAL_SALES, &formats.header)?;
    worksheet.set_column_width(0, COLUMN_WIDTH)?;
    worksheet.set_column_width(1, COLUMN_WIDTH)?;

    for (row_idx, row) in summary.rows.iter().enumerate() {
        let excel_row = u32::try_from(row_idx + 1).map_err(|_| ReportError::SheetTooLarge {
            rows: summary.rows.len(),
            columns: 2,
        })?;
        worksheet.write_string(excel_row, 0, excel_text(&row.region))?;
        worksheet.write_number_with_format(
            excel_row,
            1,
            row.total_sales,
            &formats.currency,
        )?;
    }

    Ok(())
}

/// Cuts `value` to [`MAX_CELL_CHARS`] characters.
fn excel_text(value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => {
            debug!(
                chars = value.chars().count(),
                limit = MAX_CELL_CHARS,
                "truncating cell text"
            );
            &value[..end]
        }
        None => value,
    }
}

/// Excel cannot represent dates outside 1900-9999; those are written as text.
fn to_excel_date(date: NaiveDate) -> Option<ExcelDateTime> {
    let year = u16::try_from(date.year()).ok()?;
    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8).ok()
}

fn persist(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    if let Err(error) = fs::write(&staging, bytes).and_then(|_| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(error.into());
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report.xlsx".to_string());
    path.with_file_name(format!(".{file_name}.partial"))
}
