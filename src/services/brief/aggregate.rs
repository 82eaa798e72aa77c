//! Clinical-pathway figures derived from the disease registry table.

use super::types::DISEASE_NAME_HEADER;
use super::utils::format_percent;
use crate::error::ExtractError;
use crate::models::{MetricResult, Table};

pub const PATHWAY_ENTRY_RATE: &str = "临床路径入径率";
pub const PATHWAY_COMPLETION_RATE: &str = "临床路径完成率";
pub const KEY_DISEASE_CASES: &str = "重点疾病例数";

const TOTAL_COLUMN: usize = 2;
const ENTRY_COLUMN: usize = 3;
const COMPLETED_COLUMN: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryTotals {
    pub total: i64,
    pub entries: i64,
    pub completed: i64,
}

/// First table whose header row has a `病种名称` cell.
pub fn find_registry_table(tables: &[Table]) -> Option<&Table> {
    tables.iter().find(|table| {
        table
            .first()
            .is_some_and(|headers| headers.iter().any(|cell| cell == DISEASE_NAME_HEADER))
    })
}

/// Maps full-width digits (`０`..`９`) to ASCII so `１０` reads as `10`.
fn ascii_digits(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            '\u{FF10}'..='\u{FF19}' => char::from(b'0' + (c as u32 - 0xFF10) as u8),
            _ => c,
        })
        .collect()
}

fn parse_count(table: &Table, row: usize, column: usize) -> Result<i64, ExtractError> {
    let value = table[row]
        .get(column)
        .ok_or(ExtractError::MissingCell { row, column })?;
    ascii_digits(value)
        .parse::<i64>()
        .map_err(|_| ExtractError::InvalidInteger {
            row,
            column,
            value: value.clone(),
        })
}

fn add_count(sum: i64, table: &Table, row: usize, column: usize) -> Result<i64, ExtractError> {
    sum.checked_add(parse_count(table, row, column)?)
        .ok_or(ExtractError::CountOverflow { row, column })
}

/// Sums the case, pathway-entry and completed columns over all data rows.
pub fn sum_registry(table: &Table) -> Result<RegistryTotals, ExtractError> {
    let mut totals = RegistryTotals::default();
    for row in 1..table.len() {
        totals.total = add_count(totals.total, table, row, TOTAL_COLUMN)?;
        totals.entries = add_count(totals.entries, table, row, ENTRY_COLUMN)?;
        totals.completed = add_count(totals.completed, table, row, COMPLETED_COLUMN)?;
    }
    Ok(totals)
}

fn rate(part: i64, total: i64) -> Result<String, ExtractError> {
    if total == 0 {
        return Err(ExtractError::ZeroTotal);
    }
    Ok(format_percent(part as f64 / total as f64 * 100.0))
}

fn derived(name: &str, formula: &str, actual: String) -> MetricResult {
    MetricResult {
        name: name.to_string(),
        pattern: formula.to_string(),
        actual,
        expected: String::new(),
    }
}

/// The three pathway metrics, or nothing when the document has no registry
/// table with data rows. A registry with bad counts or a zero total fails the
/// whole computation.
pub fn compute_aggregates(tables: &[Table]) -> Result<Vec<MetricResult>, ExtractError> {
    let Some(table) = find_registry_table(tables) else {
        return Ok(Vec::new());
    };
    if table.len() < 2 {
        return Ok(Vec::new());
    }

    let totals = sum_registry(table)?;
    tracing::debug!(
        "Disease registry: {} cases, {} entered pathway, {} completed",
        totals.total,
        totals.entries,
        totals.completed
    );

    Ok(vec![
        derived(
            PATHWAY_ENTRY_RATE,
            "= 入径数/病种总病例数",
            rate(totals.entries, totals.total)?,
        ),
        derived(
            PATHWAY_COMPLETION_RATE,
            "= 变异完成例数/病种总例数",
            rate(totals.completed, totals.total)?,
        ),
        derived(
            KEY_DISEASE_CASES,
            "= 病种总例数",
            format_percent(totals.total as f64),
        ),
    ])
}
