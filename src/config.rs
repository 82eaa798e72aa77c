use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::models::MetricDefinition;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DEPARTMENT: &str = "放射治疗科";

fn default_max_body_bytes() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

/// Metrics looked up in every brief, in report order.
pub static DEFAULT_CATALOG: Lazy<Vec<MetricDefinition>> = Lazy::new(|| {
    [
        ("病床使用率", r"病床使用率"),
        ("病床周转率", r"病床周转率"),
        ("平均住院日", r"平均住院日"),
        ("治愈好转率", r"好转率"),
        ("入院与出院诊断符合率", r"入院与出院诊断符合率"),
        ("成分输血率", r"成份输血率"),
        ("抗菌药物使用率", r"抗菌药物使用率"),
        ("抗菌药物使用强度", r"抗菌药物使用强度"),
        ("药物构成比", r"业务收入不含耗材收入药占比"),
        ("临床路径入径率", r"临床路径入径率"),
        ("临床路径完成率", r"临床路径完成率"),
        ("临床路径覆盖率", r"临床路径覆盖率"),
        // anchored: the wider "感染率" columns belong to other scopes
        ("院内感染发生率", r"^感染率%$"),
    ]
    .into_iter()
    .map(|(name, pattern)| MetricDefinition::new(name, pattern))
    .collect()
});

/// What the extraction engine needs: whose rows to read and which metrics to look for.
#[derive(Debug, Clone)]
pub struct BriefConfig {
    pub department: String,
    pub catalog: Vec<MetricDefinition>,
}

impl BriefConfig {
    pub fn new(department: impl Into<String>, catalog: Vec<MetricDefinition>) -> Self {
        Self {
            department: department.into(),
            catalog,
        }
    }
}

impl Default for BriefConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DEPARTMENT, DEFAULT_CATALOG.clone())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_body_bytes: usize,
    pub brief: BriefConfig,
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from a key lookup, so tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("QC_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("QC_BIND_ADDR is not a socket address")?;

        let max_body_bytes = match lookup("QC_MAX_BODY_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("QC_MAX_BODY_BYTES is not a byte count: {}", raw))?,
            None => default_max_body_bytes(),
        };

        let department = lookup("QC_DEPARTMENT")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string());

        let catalog = match lookup("QC_CATALOG_PATH") {
            Some(path) => load_catalog(Path::new(&path))?,
            None => DEFAULT_CATALOG.clone(),
        };

        Ok(Config {
            bind_addr,
            max_body_bytes,
            brief: BriefConfig::new(department, catalog),
        })
    }
}

/// Reads a catalog file: a JSON array of `{ "name": ..., "pattern": ... }`.
pub fn load_catalog(path: &Path) -> Result<Vec<MetricDefinition>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read metric catalog {}", path.display()))?;
    let catalog: Vec<MetricDefinition> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse metric catalog {}", path.display()))?;
    if catalog.is_empty() {
        anyhow::bail!("Metric catalog {} is empty", path.display());
    }
    Ok(catalog)
}
