use regex::Regex;
use smallvec::SmallVec;

use crate::error::ExtractError;
use crate::models::MetricDefinition;

/// Words that mark a row as a header row when found in its leading cells.
pub const HEADER_WORDS: [&str; 4] = ["指标", "项目", "科室", "科别"];
/// Department word used by the matcher to recognise threshold rows.
pub const DEPARTMENT_WORD: &str = "科室";
pub const INEQUALITY_MARK: char = '≥';
/// First header of full-width hospital tables, which are never split.
pub const HOSPITAL_NAME_MARK: &str = "医院名称";

pub const DISEASE_NAME_HEADER: &str = "病种名称";
pub const PATIENT_NAME_HEADER: &str = "患者姓名";
pub const ADMISSION_NUMBER_HEADER: &str = "住院号";
pub const GRADE_A_MARK: &str = "甲级";
pub const PRESCRIPTION_MARK: &str = "处方号";

/// Number of leading cells kept for a case record.
pub const CASE_RECORD_WIDTH: usize = 5;

/// Candidate cells for one metric in one table; two is the usual case.
pub type FoundValues = SmallVec<[String; 2]>;

/// A catalog entry with its header pattern compiled once.
#[derive(Debug, Clone)]
pub struct CompiledMetric {
    pub definition: MetricDefinition,
    pub header: Regex,
}

impl CompiledMetric {
    pub fn compile(definition: &MetricDefinition) -> Result<Self, ExtractError> {
        let header = Regex::new(&definition.pattern).map_err(|source| ExtractError::InvalidPattern {
            name: definition.name.clone(),
            source,
        })?;
        Ok(Self {
            definition: definition.clone(),
            header,
        })
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

/// Actual/expected pair resolved from one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedValue {
    pub actual: String,
    pub expected: String,
}
