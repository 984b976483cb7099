//! Output Parser
//!
//! External-schema adapter over the estimator's free-text output. The format
//! has drifted across estimator versions, so each field is matched by its own
//! pattern with an independent fallback: a field whose line is absent or
//! whose number is malformed degrades to undefined without invalidating the
//! rest of the record.

use crate::record::{MetricsRecord, RawTrialResult, TrialStatus};
use regex::Regex;
use std::sync::LazyLock;

// One signature per field. The bytecode line accepts both spellings the
// estimator versions print ("Length: N characters" / "Size: N bytes").
static BYTECODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Contract Bytecode (?:Length|Size): (\d+) (?:characters|bytes)")
        .expect("hard-coded pattern")
});
static GAS_UNITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Estimated Gas Units: (\d+)").expect("hard-coded pattern"));
static GAS_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Gas Price: ([\d.]+) gwei").expect("hard-coded pattern"));
static PRIORITY_FEE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Priority Fee: ([\d.]+) gwei").expect("hard-coded pattern"));
static ETH_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ETH Price: \$([\d.]+) USD").expect("hard-coded pattern"));
static DEPLOY_COST_ETH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Estimated Deployment Cost: ([\d.]+) ETH").expect("hard-coded pattern")
});
static DEPLOY_COST_USD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(~\$([\d.]+) USD\)").expect("hard-coded pattern"));

/// Extract one numeric field; a malformed number degrades to undefined.
fn capture_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Parse one trial's captured output into a `MetricsRecord`.
///
/// A failed exit yields a fully-undefined record with status `Error` and the
/// captured stderr as the error message. Otherwise every field is matched
/// independently; partial output produces a partial record, never a parse
/// failure.
pub fn parse_trial(raw: &RawTrialResult) -> MetricsRecord {
    if !raw.success {
        let message = if raw.stderr.trim().is_empty() {
            match raw.exit_code {
                Some(code) => format!("estimator exited with status {}", code),
                None => "estimator terminated without an exit status".to_string(),
            }
        } else {
            raw.stderr.trim().to_string()
        };
        return MetricsRecord::undefined(message);
    }

    let text = &raw.stdout;
    let mut record = MetricsRecord::empty();
    record.bytecode_size = capture_number(&BYTECODE, text);
    record.gas_units = capture_number(&GAS_UNITS, text);
    record.gas_price_gwei = capture_number(&GAS_PRICE, text);
    record.priority_fee_gwei = capture_number(&PRIORITY_FEE, text);
    record.eth_price_usd = capture_number(&ETH_PRICE, text);
    record.deploy_cost_eth = capture_number(&DEPLOY_COST_ETH, text);
    record.deploy_cost_usd = capture_number(&DEPLOY_COST_USD, text);
    record.standard_method = text.contains("Standard Method Used: true");
    record.bytesize_method = text.contains("Bytesize Method Used: true");
    record.status = TrialStatus::Success;
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success_output(stdout: &str) -> RawTrialResult {
        RawTrialResult {
            success: true,
            exit_code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    const FULL_OUTPUT: &str = "\
Contract Bytecode Length: 500 characters
Estimated Gas Units: 21000
Gas Price: 30.0 gwei
Priority Fee: 1.5 gwei
ETH Price: $2500.00 USD
Estimated Deployment Cost: 0.01 ETH (~$25.00 USD)
Standard Method Used: true
";

    #[test]
    fn parses_every_field_from_full_output() {
        let record = parse_trial(&success_output(FULL_OUTPUT));
        assert_eq!(record.status, TrialStatus::Success);
        assert_eq!(record.bytecode_size, Some(500.0));
        assert_eq!(record.gas_units, Some(21000.0));
        assert_eq!(record.gas_price_gwei, Some(30.0));
        assert_eq!(record.priority_fee_gwei, Some(1.5));
        assert_eq!(record.eth_price_usd, Some(2500.0));
        assert_eq!(record.deploy_cost_eth, Some(0.01));
        assert_eq!(record.deploy_cost_usd, Some(25.0));
        assert!(record.standard_method);
        assert!(!record.bytesize_method);
        assert!(record.is_complete());
    }

    #[test]
    fn accepts_bytesize_variant_spelling() {
        let record = parse_trial(&success_output(
            "Contract Bytecode Size: 1024 bytes\nBytesize Method Used: true\n",
        ));
        assert_eq!(record.bytecode_size, Some(1024.0));
        assert!(record.bytesize_method);
    }

    #[test]
    fn missing_fields_stay_undefined_without_aborting() {
        let record = parse_trial(&success_output(
            "Estimated Gas Units: 21000\nETH Price: $2500.00 USD\n",
        ));
        assert_eq!(record.gas_units, Some(21000.0));
        assert_eq!(record.eth_price_usd, Some(2500.0));
        assert_eq!(record.bytecode_size, None);
        assert_eq!(record.deploy_cost_eth, None);
        assert_eq!(record.status, TrialStatus::Success);
        assert!(!record.is_complete());
    }

    #[test]
    fn malformed_number_degrades_only_that_field() {
        // "30.0.1" matches the pattern's character class but is not a number
        let record = parse_trial(&success_output(
            "Gas Price: 30.0.1 gwei\nEstimated Gas Units: 21000\n",
        ));
        assert_eq!(record.gas_price_gwei, None);
        assert_eq!(record.gas_units, Some(21000.0));
    }

    #[test]
    fn failed_exit_yields_fully_undefined_record() {
        let raw = RawTrialResult {
            success: false,
            exit_code: Some(1),
            stdout: "Estimated Gas Units: 21000\n".to_string(),
            stderr: "Compilation failed with errors.\n".to_string(),
        };
        let record = parse_trial(&raw);
        assert_eq!(record.status, TrialStatus::Error);
        assert_eq!(
            record.error_message.as_deref(),
            Some("Compilation failed with errors.")
        );
        // Output is ignored for failed trials
        assert_eq!(record.gas_units, None);
        assert!(!record.is_complete());
    }

    #[test]
    fn failed_exit_without_stderr_reports_status() {
        let raw = RawTrialResult {
            success: false,
            exit_code: Some(7),
            stdout: String::new(),
            stderr: String::new(),
        };
        let record = parse_trial(&raw);
        assert_eq!(
            record.error_message.as_deref(),
            Some("estimator exited with status 7")
        );
    }

    #[test]
    fn round_trips_formatted_fields() {
        // Formatting a record's fields the way the estimator prints them and
        // re-parsing yields the same numeric values.
        let output = format!(
            "Contract Bytecode Length: {} characters\n\
             Estimated Gas Units: {}\n\
             Gas Price: {} gwei\n\
             Priority Fee: {} gwei\n\
             ETH Price: ${:.2} USD\n\
             Estimated Deployment Cost: {} ETH (~${:.2} USD)\n",
            731, 167200, 28.75, 0.5, 3012.44, 0.004807, 14.48
        );
        let record = parse_trial(&success_output(&output));
        assert_eq!(record.bytecode_size, Some(731.0));
        assert_eq!(record.gas_units, Some(167200.0));
        assert_eq!(record.gas_price_gwei, Some(28.75));
        assert_eq!(record.priority_fee_gwei, Some(0.5));
        assert_eq!(record.eth_price_usd, Some(3012.44));
        assert_eq!(record.deploy_cost_eth, Some(0.004807));
        assert_eq!(record.deploy_cost_usd, Some(14.48));
    }
}
