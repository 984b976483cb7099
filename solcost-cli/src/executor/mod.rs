//! Estimation Executor
//!
//! The run-side of the pipeline: per-contract trial sampling and reduction,
//! report assembly, and human-readable formatting.

mod formatting;
mod report;
mod sampling;

pub use formatting::format_human_output;
pub use report::build_report;
pub use sampling::{SampleAggregator, TrialPolicy};

/// Default trials per contract.
pub const DEFAULT_TRIALS: usize = 10;
