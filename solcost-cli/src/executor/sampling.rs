//! Sample Aggregation
//!
//! Drives the estimator N times per contract and reduces the noisy trial
//! records to one report row. Trials run strictly sequentially: a trial's
//! subprocess must fully exit before the next one starts, since the
//! estimator leans on rate-limited live price and gas feeds.
//!
//! ## Pipeline
//!
//! ```text
//! ContractUnit
//!      │ probe (trial 1)
//!      ▼
//! short-circuit? ──yes──▶ fully-undefined row
//!      │no
//!      ▼ trials 2..=N
//! MetricsRecords ──validity filter──▶ mean / population std-dev per field
//!      │
//!      ▼
//! ContractRow
//! ```

use crate::executor::DEFAULT_TRIALS;
use solcost_oracle::{ContractUnit, MetricsRecord, OracleInvoker, parse_trial};
use solcost_report::{ContractRow, FieldStat, RowStatus};
use solcost_stats::compute_summary;

/// Sampling policy: how many trials to run and which records count.
///
/// Kept separate from the aggregator so tests (and future callers) can vary
/// the trial count and predicates without touching the trial loop.
#[derive(Debug, Clone, Copy)]
pub struct TrialPolicy {
    /// Trials per contract, probe included
    pub trials: usize,
}

impl Default for TrialPolicy {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
        }
    }
}

impl TrialPolicy {
    /// Whether the probe trial proves the unit deterministically fails.
    ///
    /// Bytecode size depends only on the compiled source, not on live market
    /// data: if the first trial could not produce it, no retry will, and the
    /// remaining trials would be wasted subprocess invocations.
    pub fn short_circuits(&self, probe: &MetricsRecord) -> bool {
        probe.bytecode_size.is_none()
    }

    /// All-or-nothing validity: a record with any missing required field
    /// contributes to no field's statistics.
    pub fn is_valid(&self, record: &MetricsRecord) -> bool {
        record.is_complete()
    }
}

/// Runs the invoker and parser once per trial and folds the records into a
/// row.
pub struct SampleAggregator<I> {
    invoker: I,
    policy: TrialPolicy,
}

impl<I: OracleInvoker> SampleAggregator<I> {
    /// Create an aggregator over the given invoker and policy.
    pub fn new(invoker: I, policy: TrialPolicy) -> Self {
        Self { invoker, policy }
    }

    /// One trial: invoke the estimator and parse its output.
    ///
    /// A spawn failure is absorbed as a failed trial record; it marks the
    /// trial, never the run.
    fn run_trial(&self, unit: &ContractUnit) -> MetricsRecord {
        match self.invoker.invoke(unit) {
            Ok(raw) => parse_trial(&raw),
            Err(e) => MetricsRecord::undefined(e.to_string()),
        }
    }

    /// Run all trials for one contract and reduce them to a report row.
    pub fn aggregate(&self, unit: &ContractUnit) -> ContractRow {
        let probe = self.run_trial(unit);
        if self.policy.short_circuits(&probe) {
            tracing::warn!(
                contract = %unit.name,
                "probe trial failed; skipping remaining trials"
            );
            return ContractRow::undefined(&unit.name, probe.error_message);
        }

        let mut records = Vec::with_capacity(self.policy.trials.max(1));
        records.push(probe);
        for trial in 1..self.policy.trials.max(1) {
            tracing::debug!(contract = %unit.name, trial = trial + 1, "running trial");
            records.push(self.run_trial(unit));
        }

        self.reduce(unit, &records)
    }

    fn reduce(&self, unit: &ContractUnit, records: &[MetricsRecord]) -> ContractRow {
        let valid: Vec<&MetricsRecord> = records
            .iter()
            .filter(|r| self.policy.is_valid(r))
            .collect();

        // Bytecode size is invocation-invariant: measured once on the probe,
        // deviation fixed at 0. Reaching this point means the probe defined
        // it, so it stays defined even when no trial was fully valid.
        let bytecode_size = records[0].bytecode_size.map(FieldStat::exact);

        if valid.is_empty() {
            let first_error = records.iter().find_map(|r| r.error_message.clone());
            let mut row = ContractRow::undefined(&unit.name, first_error);
            row.bytecode_size = bytecode_size;
            return row;
        }

        ContractRow {
            contract: unit.name.clone(),
            bytecode_size,
            eth_price_usd: field_stat(&valid, |r| r.eth_price_usd),
            gas_fees: field_stat(&valid, |r| r.gas_units),
            gas_price_gwei: field_stat(&valid, |r| r.gas_price_gwei),
            priority_fee_gwei: field_stat(&valid, |r| r.priority_fee_gwei),
            deploy_cost_eth: field_stat(&valid, |r| r.deploy_cost_eth),
            deploy_cost_usd: field_stat(&valid, |r| r.deploy_cost_usd),
            standard_method: records.iter().any(|r| r.standard_method),
            bytesize_method: records.iter().any(|r| r.bytesize_method),
            status: RowStatus::Success,
            error_message: None,
        }
    }
}

/// Reduce one field across the valid records.
///
/// The field is defined only when every valid record defines it; a field the
/// estimator variant never emits (e.g. priority fee) stays undefined rather
/// than averaging over a partial subset.
fn field_stat(
    valid: &[&MetricsRecord],
    field: impl Fn(&MetricsRecord) -> Option<f64>,
) -> Option<FieldStat> {
    let samples: Vec<f64> = valid.iter().filter_map(|r| field(r)).collect();
    if samples.len() != valid.len() {
        return None;
    }
    compute_summary(&samples).map(|s| FieldStat {
        mean: s.mean,
        std_dev: s.std_dev,
    })
}
