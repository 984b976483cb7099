//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema version written into report metadata.
pub const SCHEMA_VERSION: u32 = 1;

/// Mean and deviation for one report cell.
///
/// A cell that could not be computed (zero valid trials) is absent entirely;
/// the serialized table shows it as "undefined", never as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStat {
    /// Arithmetic mean over valid trials
    pub mean: f64,
    /// Population standard deviation over valid trials
    pub std_dev: f64,
}

impl FieldStat {
    /// A single deterministic measurement: the value itself, deviation 0.
    pub fn exact(value: f64) -> Self {
        Self {
            mean: value,
            std_dev: 0.0,
        }
    }
}

/// Row-level outcome for one contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    /// At least one trial was valid; statistics are defined
    Success,
    /// Every trial failed or was partial; the whole row is undefined
    Undefined,
}

/// Aggregated statistics for one contract, one row of the report.
///
/// Constructed once per contract per run and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractRow {
    /// Contract file name
    pub contract: String,
    /// Compiled bytecode size (measured once; deviation fixed at 0)
    pub bytecode_size: Option<FieldStat>,
    /// ETH/USD price over valid trials
    pub eth_price_usd: Option<FieldStat>,
    /// Estimated gas units over valid trials
    pub gas_fees: Option<FieldStat>,
    /// Base gas price in gwei (auxiliary; absent from one estimator variant)
    pub gas_price_gwei: Option<FieldStat>,
    /// Priority fee in gwei (auxiliary; absent from one estimator variant)
    pub priority_fee_gwei: Option<FieldStat>,
    /// Deployment cost in ETH over valid trials
    pub deploy_cost_eth: Option<FieldStat>,
    /// Deployment cost in USD over valid trials
    pub deploy_cost_usd: Option<FieldStat>,
    /// Any trial reported the standard estimation method
    pub standard_method: bool,
    /// Any trial reported the bytecode-size fallback method
    pub bytesize_method: bool,
    /// Row outcome
    pub status: RowStatus,
    /// Error text from the failing trial, for undefined rows
    pub error_message: Option<String>,
}

impl ContractRow {
    /// A fully-undefined row for a contract whose trials all failed.
    pub fn undefined(contract: impl Into<String>, error_message: Option<String>) -> Self {
        Self {
            contract: contract.into(),
            bytecode_size: None,
            eth_price_usd: None,
            gas_fees: None,
            gas_price_gwei: None,
            priority_fee_gwei: None,
            deploy_cost_eth: None,
            deploy_cost_usd: None,
            standard_method: false,
            bytesize_method: false,
            status: RowStatus::Undefined,
            error_message,
        }
    }
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Report schema version
    pub schema_version: u32,
    /// solcost version that produced the report
    pub version: String,
    /// UTC time the run completed
    pub timestamp: DateTime<Utc>,
    /// Command line of the estimator the run invoked
    pub oracle_command: String,
    /// Trials per contract
    pub trials: usize,
}

/// Completion summary over all rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Contracts processed
    pub total_contracts: usize,
    /// Rows with defined statistics
    pub succeeded: usize,
    /// Rows that came out fully undefined
    pub undefined: usize,
}

/// Complete estimation report: one row per contract, in enumeration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// Aggregated rows, ordered as the contracts were enumerated
    pub rows: Vec<ContractRow>,
    /// Completion summary
    pub summary: ReportSummary,
}
