#![warn(missing_docs)]
//! Solcost Report - Output Generation
//!
//! Report data model plus output formats:
//! - CSV (the canonical persisted table, one row per contract)
//! - JSON (machine-readable, full schema)
//! - Human (terminal summary, rendered by the CLI crate)

mod csv;
mod json;
mod report;

pub use csv::generate_csv_report;
pub use json::generate_json_report;
pub use report::{
    ContractRow, FieldStat, Report, ReportMeta, ReportSummary, RowStatus, SCHEMA_VERSION,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Fixed-column CSV table
    Csv,
    /// JSON with full schema
    Json,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
