//! Extraction of one department's quality-control figures from a brief.
//!
//! Tables flow through grid cleaning, wide-table splitting and row
//! filtering; the filtered tables are then read independently by the metric
//! matcher, the disease-registry aggregates and the case-record listing.

pub mod aggregate;
pub mod filter;
pub mod grid;
pub mod matcher;
pub mod records;
pub mod types;
pub mod utils;

pub use matcher::MetricMatcher;

use crate::config::BriefConfig;
use crate::error::ExtractError;
use crate::models::{BriefExtraction, Document, MetricReport, Table};

#[derive(Debug, Clone)]
pub struct BriefExtractor {
    department: String,
    matcher: MetricMatcher,
}

impl BriefExtractor {
    /// Compiles the catalog; fails on the first invalid header pattern.
    pub fn new(config: &BriefConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            department: config.department.clone(),
            matcher: MetricMatcher::new(config)?,
        })
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    /// Cleaned, split and filtered tables, one per input table.
    pub fn prepare_tables(&self, raw_tables: &[Table]) -> Vec<Table> {
        raw_tables
            .iter()
            .map(grid::build_grid)
            .map(grid::split_wide_table)
            .map(|table| filter::filter_table(&table, &self.department))
            .collect()
    }

    /// Catalog matches with the registry aggregates merged over them.
    pub fn metrics(&self, tables: &[Table]) -> Result<MetricReport, ExtractError> {
        let mut report = self.matcher.match_tables(tables);
        for result in aggregate::compute_aggregates(tables)? {
            report.upsert(result);
        }
        Ok(report)
    }

    pub fn extract(&self, document: &Document) -> Result<BriefExtraction, ExtractError> {
        let tables = self.prepare_tables(&document.tables);
        let metrics = self.metrics(&tables)?;
        let case_records = records::case_records(&tables);
        let grade_a_records = records::grade_a_records(&case_records);
        let prescription_reviews =
            records::prescription_reviews(&document.paragraphs, &self.department);

        tracing::info!(
            "Extracted {}: {}/{} metrics resolved, {} case records ({} grade A), {} prescription reviews",
            self.department,
            metrics.resolved_count(),
            metrics.len(),
            case_records.len(),
            grade_a_records.len(),
            prescription_reviews.len()
        );

        Ok(BriefExtraction {
            department: self.department.clone(),
            metrics,
            case_records,
            grade_a_records,
            prescription_reviews,
        })
    }
}
