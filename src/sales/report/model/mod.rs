use std::fmt;

use chrono::NaiveDate;

/// Column holding the sales representative's name.
pub const SALES_REP: &str = "Sales Rep";
/// Column holding the sales region.
pub const REGION: &str = "Region";
/// Column holding the product name.
pub const PRODUCT: &str = "Product";
/// Column holding the order status.
pub const STATUS: &str = "Status";
/// Column holding the order amount.
pub const TOTAL_SALES: &str = "Total Sales";
/// Column holding the order date.
pub const DATE: &str = "Date";

/// A single dynamically typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Free-form text.
    Text(String),
    /// Finite floating point number.
    Number(f64),
    /// Calendar date without a time component.
    Date(NaiveDate),
    /// Missing value.
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the numeric value, if the cell holds one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(value) => f.write_str(value),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
            CellValue::Null => Ok(()),
        }
    }
}

/// In-memory sales table: named columns plus rows aligned with them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RecordTable {
    /// Creates an empty table with the provided column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding it with nulls or truncating it to the column count.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Null);
        self.rows.push(row);
    }

    /// Index of the named column, matched exactly.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of the named column in row order, if the column exists.
    pub fn column(&self, name: &str) -> Option<Vec<&CellValue>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }
}
