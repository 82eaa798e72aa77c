use serde::{Deserialize, Serialize};

/// A cleaned cell: raw text with spaces and newlines removed.
pub type Cell = String;
pub type Row = Vec<Cell>;
/// Row 0 is conventionally the header row. Rows may differ in length.
pub type Table = Vec<Row>;

/// A document as handed over by whatever loaded it: raw tables in document
/// order plus the free-text paragraphs.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Document {
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetricDefinition {
    pub name: String,
    pub pattern: String,
}

impl MetricDefinition {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// One resolved (or still empty) metric. `pattern` carries the header pattern
/// for catalog metrics and the formula text for aggregate metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricResult {
    pub name: String,
    pub pattern: String,
    pub actual: String,
    pub expected: String,
}

impl MetricResult {
    pub fn empty(definition: &MetricDefinition) -> Self {
        Self {
            name: definition.name.clone(),
            pattern: definition.pattern.clone(),
            actual: String::new(),
            expected: String::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        !self.actual.is_empty()
    }
}

/// Metric results keyed by name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetricReport {
    entries: Vec<MetricResult>,
}

impl MetricReport {
    pub fn get(&self, name: &str) -> Option<&MetricResult> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Replaces the entry with the same name in place, or appends it.
    pub fn upsert(&mut self, result: MetricResult) {
        match self.entries.iter_mut().find(|entry| entry.name == result.name) {
            Some(existing) => *existing = result,
            None => self.entries.push(result),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_resolved()).count()
    }
}

/// Everything the engine extracts from one document.
#[derive(Debug, Clone, Serialize)]
pub struct BriefExtraction {
    pub department: String,
    pub metrics: MetricReport,
    /// Department case-record rows, each cut to its first five cells.
    pub case_records: Vec<Row>,
    pub grade_a_records: Vec<Row>,
    pub prescription_reviews: Vec<String>,
}
