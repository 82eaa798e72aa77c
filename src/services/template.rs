//! Writes extracted figures into the output template's tables, held as
//! in-memory grids. Loading and saving the template file is up to the caller.

use crate::models::{MetricReport, Row, Table};
use crate::services::brief::types::{ADMISSION_NUMBER_HEADER, PATIENT_NAME_HEADER};
use crate::services::brief::utils::{cell_at, remove_blanks};

const METRICS_TABLE_MARK: &str = "指标";

/// Columns holding a metric name, each followed by its actual and expected cells.
const METRIC_NAME_COLUMNS: [usize; 2] = [0, 3];

fn set_cell(row: &mut Row, index: usize, value: &str) {
    if let Some(cell) = row.get_mut(index) {
        *cell = value.to_string();
    }
}

pub fn find_metrics_table(template: &[Table]) -> Option<usize> {
    template.iter().position(|table| {
        table
            .first()
            .is_some_and(|headers| remove_blanks(cell_at(headers, 0)) == METRICS_TABLE_MARK)
    })
}

pub fn find_case_record_table(template: &[Table]) -> Option<usize> {
    template.iter().position(|table| {
        table.first().is_some_and(|headers| {
            let headers: Vec<String> = headers.iter().map(|cell| remove_blanks(cell)).collect();
            headers.iter().any(|cell| cell == PATIENT_NAME_HEADER)
                && headers.iter().any(|cell| cell == ADMISSION_NUMBER_HEADER)
        })
    })
}

/// Fills actual/expected next to every metric name the report knows.
/// Returns the number of actual/expected pairs written.
pub fn fill_metric_table(table: &mut Table, report: &MetricReport) -> usize {
    let mut written = 0;
    for row in table.iter_mut() {
        for column in METRIC_NAME_COLUMNS {
            let name = remove_blanks(cell_at(row, column));
            let Some(result) = report.get(&name) else {
                continue;
            };
            set_cell(row, column + 1, &result.actual);
            set_cell(row, column + 2, &result.expected);
            written += 1;
        }
    }
    written
}

/// Writes numbered records below the header, adding rows when the template
/// has too few. Record cells 1..5 land in the same columns; column 0 gets
/// the 1-based sequence number.
pub fn fill_case_record_table(table: &mut Table, records: &[Row]) {
    let width = table.first().map_or(0, Vec::len);
    while table.len() < records.len() + 1 {
        table.push(vec![String::new(); width]);
    }
    for (index, record) in records.iter().enumerate() {
        let row = &mut table[index + 1];
        set_cell(row, 0, &(index + 1).to_string());
        for column in 1..5 {
            set_cell(row, column, cell_at(record, column));
        }
    }
}

/// Fills whichever of the metrics and case-record tables the template has.
pub fn fill_template(template: &mut [Table], report: &MetricReport, grade_a_records: &[Row]) {
    match find_metrics_table(template) {
        Some(index) => {
            let written = fill_metric_table(&mut template[index], report);
            tracing::debug!("Filled {} metrics in template table {}", written, index);
        }
        None => tracing::warn!("Template has no metrics table"),
    }
    match find_case_record_table(template) {
        Some(index) => fill_case_record_table(&mut template[index], grade_a_records),
        None => tracing::warn!("Template has no case record table"),
    }
}
