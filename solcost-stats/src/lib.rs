#![warn(missing_docs)]
//! Solcost Statistical Engine
//!
//! Reduces the valid samples of one estimation field to summary statistics.
//! Deviations use the population formula (denominator N, not N-1) so the
//! numbers line up with earlier estimation tooling.

mod summary;

pub use summary::{FieldSummary, compute_summary};
