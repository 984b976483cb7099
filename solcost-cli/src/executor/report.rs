//! Report Building
//!
//! Assembles aggregated rows into the final report: rows stay in contract
//! enumeration order, the summary counts row outcomes, and the metadata
//! records what produced the numbers.

use solcost_report::{ContractRow, Report, ReportMeta, ReportSummary, RowStatus, SCHEMA_VERSION};

/// Build a complete report from aggregated rows.
///
/// Rows are appended in the order given, which the caller guarantees to be
/// the contract enumeration order.
pub fn build_report(rows: Vec<ContractRow>, oracle_command: String, trials: usize) -> Report {
    let mut summary = ReportSummary {
        total_contracts: rows.len(),
        ..Default::default()
    };

    for row in &rows {
        match row.status {
            RowStatus::Success => summary.succeeded += 1,
            RowStatus::Undefined => summary.undefined += 1,
        }
    }

    Report {
        meta: ReportMeta {
            schema_version: SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now(),
            oracle_command,
            trials,
        },
        rows,
        summary,
    }
}
