//! Human Output Formatting
//!
//! Terminal rendering of a finished report: one line per contract plus a
//! completion summary.

use solcost_report::{FieldStat, Report, RowStatus};

fn stat(stat: Option<&FieldStat>, unit: &str) -> String {
    match stat {
        Some(s) => format!("{:.4} ±{:.4}{}", s.mean, s.std_dev, unit),
        None => "undefined".to_string(),
    }
}

/// Format the report for terminal display.
pub fn format_human_output(report: &Report) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str("Solcost Estimation Results\n");
    out.push_str(&"=".repeat(60));
    out.push_str("\n\n");
    out.push_str(&format!(
        "Oracle: {} ({} trials per contract)\n\n",
        report.meta.oracle_command, report.meta.trials
    ));

    for row in &report.rows {
        match row.status {
            RowStatus::Success => {
                out.push_str(&format!("✓ {}\n", row.contract));
                if let Some(size) = &row.bytecode_size {
                    out.push_str(&format!("    bytecode size: {}\n", size.mean));
                }
                out.push_str(&format!(
                    "    gas units: {}  eth price: {}\n",
                    stat(row.gas_fees.as_ref(), ""),
                    stat(row.eth_price_usd.as_ref(), " USD"),
                ));
                out.push_str(&format!(
                    "    deployment cost: {} ETH ({} USD)\n",
                    stat(row.deploy_cost_eth.as_ref(), ""),
                    stat(row.deploy_cost_usd.as_ref(), ""),
                ));
            }
            RowStatus::Undefined => {
                out.push_str(&format!(
                    "✗ {}: undefined ({})\n",
                    row.contract,
                    row.error_message.as_deref().unwrap_or("no valid trials")
                ));
            }
        }
        out.push('\n');
    }

    out.push_str("Summary\n");
    out.push_str(&"-".repeat(60));
    out.push('\n');
    out.push_str(&format!(
        "  Estimated: {}  Undefined: {}  Total: {}\n",
        report.summary.succeeded, report.summary.undefined, report.summary.total_contracts
    ));

    out
}
