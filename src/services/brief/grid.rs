use super::types::HOSPITAL_NAME_MARK;
use super::utils::remove_blanks;
use crate::models::{Row, Table};

/// Cleans every cell of a raw table.
pub fn build_grid(raw: &Table) -> Table {
    raw.iter()
        .map(|row| row.iter().map(|cell| remove_blanks(cell)).collect())
        .collect()
}

/// Width of the repeated column group when the header row is two or more
/// identical groups side by side, `None` otherwise.
pub fn repeated_group_width(headers: &Row) -> Option<usize> {
    let first = headers.first()?;
    let repeats = headers.iter().filter(|header| *header == first).count();
    let step = headers.len() / repeats;

    if repeats < 2 || repeats == headers.len() || first.contains(HOSPITAL_NAME_MARK) {
        return None;
    }
    if headers[..step].concat() != headers[step..step * 2].concat() {
        return None;
    }
    Some(step)
}

fn slice(row: &Row, start: usize, end: usize) -> Row {
    let end = end.min(row.len());
    let start = start.min(end);
    row[start..end].to_vec()
}

/// Stacks the column groups of a wide table under one header. The header
/// keeps its first group; each data row becomes one row per group, left to
/// right. Tables whose header does not repeat are returned unchanged.
pub fn split_wide_table(table: Table) -> Table {
    let Some(step) = table.first().and_then(repeated_group_width) else {
        return table;
    };
    let width = table[0].len();

    let mut stacked = Vec::with_capacity(table.len() * (width / step));
    for (index, row) in table.iter().enumerate() {
        stacked.push(slice(row, 0, step));
        if index > 0 {
            for start in (step..width).step_by(step) {
                stacked.push(slice(row, start, start + step));
            }
        }
    }
    tracing::debug!(
        "Split wide table: {} columns in groups of {}, {} rows -> {}",
        width,
        step,
        table.len(),
        stacked.len()
    );
    stacked
}
