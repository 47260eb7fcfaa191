use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::sales::report::error::{ReportError, Result};
use crate::sales::report::model::{REGION, RecordTable, TOTAL_SALES};

/// Total sales for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Total Sales")]
    pub total_sales: f64,
}

/// Regional totals ordered from the largest to the smallest sum.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Summary {
    pub rows: Vec<SummaryRow>,
}

impl Summary {
    /// Sum over every region.
    pub fn grand_total(&self) -> f64 {
        self.rows.iter().map(|row| row.total_sales).sum()
    }
}

/// Sums Total Sales per Region of a cleaned table.
///
/// Groups are keyed on the exact Region text, so the `TBD` and `Unknown`
/// placeholders form groups of their own. The result is sorted by total,
/// descending; equal totals keep the order in which their region first appears.
/// Fails when either column is missing.
pub fn summarize(table: &RecordTable) -> Result<Summary> {
    let region_idx = table
        .column_index(REGION)
        .ok_or_else(|| ReportError::MissingAggregationColumn(REGION.to_string()))?;
    let sales_idx = table
        .column_index(TOTAL_SALES)
        .ok_or_else(|| ReportError::MissingAggregationColumn(TOTAL_SALES.to_string()))?;

    let mut rows: Vec<SummaryRow> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for record in &table.rows {
        let region = record[region_idx].to_string();
        let amount = record[sales_idx].as_number().unwrap_or(0.0);

        match positions.get(&region) {
            Some(&position) => rows[position].total_sales += amount,
            None => {
                positions.insert(region.clone(), rows.len());
                rows.push(SummaryRow {
                    region,
                    total_sales: amount,
                });
            }
        }
    }

    rows.sort_by(|lhs, rhs| rhs.total_sales.total_cmp(&lhs.total_sales));
    debug!(regions = rows.len(), "summary computed");
    Ok(Summary { rows })
}
