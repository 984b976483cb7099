//! Trial Data Structures
//!
//! One `RawTrialResult` exists per estimator invocation and is immediately
//! folded into a `MetricsRecord` by the parser. Every recognized field key is
//! always present in a record; fields the estimator did not report are `None`
//! ("undefined"), never dropped.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One contract source artifact to be estimated.
///
/// Immutable once discovered; consumed once per report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractUnit {
    /// File name of the contract (e.g. `Token.sol`)
    pub name: String,
    /// Full path to the source file, passed to the estimator
    pub path: PathBuf,
}

impl ContractUnit {
    /// Build a unit from a source file path. The unit name is the file name.
    pub fn from_path(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { name, path }
    }
}

/// Raw outcome of one estimator invocation.
#[derive(Debug, Clone)]
pub struct RawTrialResult {
    /// Whether the process exited successfully (zero status)
    pub success: bool,
    /// Exit code if the process exited normally
    pub exit_code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl RawTrialResult {
    /// A synthetic failed trial carrying only an error description.
    ///
    /// Used for trials that never produced a process exit (spawn failure,
    /// timeout kill).
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: None,
            stdout: String::new(),
            stderr: message.into(),
        }
    }
}

/// Whether a trial produced usable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrialStatus {
    /// Estimator exited zero; fields were parsed from its output
    Success,
    /// Estimator failed to run or exited non-zero
    Error,
}

/// Structured result of parsing one trial's output.
///
/// Numeric fields are `None` when the estimator did not report them or the
/// reported number was malformed. The five fields every estimator variant
/// emits (bytecode size, gas units, ETH price, deployment cost in ETH and
/// USD) form the required set checked by [`MetricsRecord::is_complete`];
/// gas price and priority fee are auxiliary readings one estimator variant
/// omits entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRecord {
    /// Compiled bytecode size (invocation-invariant: depends only on source)
    pub bytecode_size: Option<f64>,
    /// Estimated gas units for deployment
    pub gas_units: Option<f64>,
    /// Base gas price in gwei
    pub gas_price_gwei: Option<f64>,
    /// Priority fee in gwei
    pub priority_fee_gwei: Option<f64>,
    /// ETH/USD exchange rate
    pub eth_price_usd: Option<f64>,
    /// Deployment cost in ETH
    pub deploy_cost_eth: Option<f64>,
    /// Deployment cost in USD
    pub deploy_cost_usd: Option<f64>,
    /// Estimator used the standard gas-estimation method
    pub standard_method: bool,
    /// Estimator fell back to the bytecode-size method
    pub bytesize_method: bool,
    /// Trial outcome
    pub status: TrialStatus,
    /// Captured error text for failed trials
    pub error_message: Option<String>,
}

impl MetricsRecord {
    /// A fully-undefined record for a failed trial.
    pub fn undefined(error_message: impl Into<String>) -> Self {
        Self {
            bytecode_size: None,
            gas_units: None,
            gas_price_gwei: None,
            priority_fee_gwei: None,
            eth_price_usd: None,
            deploy_cost_eth: None,
            deploy_cost_usd: None,
            standard_method: false,
            bytesize_method: false,
            status: TrialStatus::Error,
            error_message: Some(error_message.into()),
        }
    }

    /// An empty successful record with every field undefined.
    pub fn empty() -> Self {
        Self {
            bytecode_size: None,
            gas_units: None,
            gas_price_gwei: None,
            priority_fee_gwei: None,
            eth_price_usd: None,
            deploy_cost_eth: None,
            deploy_cost_usd: None,
            standard_method: false,
            bytesize_method: false,
            status: TrialStatus::Success,
            error_message: None,
        }
    }

    /// All-or-nothing validity: the record contributes to aggregation only
    /// when every required field is defined. A record with even one missing
    /// required field is excluded from the statistics of every field.
    pub fn is_complete(&self) -> bool {
        self.bytecode_size.is_some()
            && self.gas_units.is_some()
            && self.eth_price_usd.is_some()
            && self.deploy_cost_eth.is_some()
            && self.deploy_cost_usd.is_some()
    }
}
