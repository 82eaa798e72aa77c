use super::types::{CompiledMetric, FoundValues, ResolvedValue, DEPARTMENT_WORD, INEQUALITY_MARK};
use super::utils::cell_at;
use crate::config::BriefConfig;
use crate::error::ExtractError;
use crate::models::{MetricReport, MetricResult, Row, Table};

/// Looks up catalog metrics in filtered tables.
///
/// Each metric is resolved by the first table, in document order, that yields
/// a non-empty actual value for it; later tables are never consulted for a
/// resolved metric.
#[derive(Debug, Clone)]
pub struct MetricMatcher {
    department: String,
    metrics: Vec<CompiledMetric>,
}

impl MetricMatcher {
    pub fn new(config: &BriefConfig) -> Result<Self, ExtractError> {
        let metrics = config
            .catalog
            .iter()
            .map(CompiledMetric::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            department: config.department.clone(),
            metrics,
        })
    }

    pub fn metrics(&self) -> &[CompiledMetric] {
        &self.metrics
    }

    /// An empty result for every catalog entry, in catalog order.
    pub fn empty_report(&self) -> MetricReport {
        let mut report = MetricReport::default();
        for metric in &self.metrics {
            report.upsert(MetricResult::empty(&metric.definition));
        }
        report
    }

    /// Runs every table through [`Self::apply`], starting from an empty report.
    pub fn match_tables(&self, tables: &[Table]) -> MetricReport {
        tables
            .iter()
            .fold(self.empty_report(), |report, table| self.apply(report, table))
    }

    /// Fills in the metrics still unresolved in `report` from one table.
    pub fn apply(&self, mut report: MetricReport, table: &Table) -> MetricReport {
        for metric in &self.metrics {
            if report.get(metric.name()).is_some_and(MetricResult::is_resolved) {
                continue;
            }
            let Some(value) = self.find_value(table, metric) else {
                continue;
            };
            tracing::debug!(
                "Resolved {}: actual={} expected={}",
                metric.name(),
                value.actual,
                value.expected
            );
            report.upsert(MetricResult {
                name: metric.definition.name.clone(),
                pattern: metric.definition.pattern.clone(),
                actual: value.actual,
                expected: value.expected,
            });
        }
        report
    }

    /// The metric's value in this table, if the table yields a non-empty actual.
    pub fn find_value(&self, table: &Table, metric: &CompiledMetric) -> Option<ResolvedValue> {
        let column = find_column(table.first()?, metric)?;
        let found = collect_values(table, column, &self.department);
        resolve(found).filter(|value| !value.actual.is_empty())
    }
}

/// First header cell, left to right, in which the metric's pattern is found.
pub fn find_column(headers: &Row, metric: &CompiledMetric) -> Option<usize> {
    headers.iter().position(|header| metric.header.is_match(header))
}

/// Label identifying a row: its first two cells joined.
pub fn row_identity(row: &Row) -> String {
    format!("{}{}", cell_at(row, 0), cell_at(row, 1))
}

/// Cells of `column` taken from department rows and from threshold rows (a
/// department-labelled row whose cell holds a `≥` bound). Rows too short to
/// have the column are skipped.
pub fn collect_values(table: &Table, column: usize, department: &str) -> FoundValues {
    let mut found = FoundValues::new();
    for row in table {
        let Some(cell) = row.get(column) else {
            continue;
        };
        let identity = row_identity(row);
        if identity.contains(department)
            || (identity.contains(DEPARTMENT_WORD) && cell.contains(INEQUALITY_MARK))
        {
            found.push(cell.clone());
        }
    }
    found
}

/// Turns candidate cells into actual/expected by position.
///
/// Two candidates are read as benchmark then department value, matching the
/// layout of these forms; magnitudes are never compared. One candidate is the
/// actual value. With three or more only the first is kept.
pub fn resolve(found: FoundValues) -> Option<ResolvedValue> {
    match found.len() {
        0 => None,
        2 => {
            let mut values = found.into_iter();
            let expected = values.next().unwrap_or_default();
            let actual = values.next().unwrap_or_default();
            Some(ResolvedValue { actual, expected })
        }
        _ => found.into_iter().next().map(|actual| ResolvedValue {
            actual,
            expected: String::new(),
        }),
    }
}
