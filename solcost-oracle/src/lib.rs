#![warn(missing_docs)]
//! Solcost Oracle - Estimator Invocation and Output Parsing
//!
//! This crate owns the boundary to the external deployment-cost estimator:
//! - `CommandInvoker` runs the estimator once per trial as a subprocess and
//!   captures its exit status and text streams
//! - `parse_trial` turns the captured free-text output into a structured
//!   `MetricsRecord`, degrading missing or malformed fields to undefined
//!   one field at a time
//!
//! The estimator communicates exclusively via exit status and stdout/stderr;
//! there is no structured channel. A non-zero exit is data (a failed trial),
//! never an error of the invoker itself.

mod invoker;
mod parser;
mod record;

pub use invoker::{CommandInvoker, InvokeError, OracleInvoker};
pub use parser::parse_trial;
pub use record::{ContractUnit, MetricsRecord, RawTrialResult, TrialStatus};
