//! CSV Report
//!
//! The canonical persisted table. Column order is fixed: the original
//! estimate table's columns first, then the extended columns (auxiliary fee
//! statistics, method flags, status, error message). Undefined cells are
//! written as the literal `undefined`, never as zero or an empty cell.

use crate::report::{ContractRow, FieldStat, Report, RowStatus};

const HEADER: &[&str] = &[
    "Contract name",
    "Bytesize",
    "Average ETH Price",
    "STD ETH price",
    "Average Gas Fees",
    "STD Gas fees",
    "Average deployment cost (ETH)",
    "STD Deployment cost (ETH)",
    "Average deployment cost (USD)",
    "STD Deployment cost (USD)",
    "Average Gas Price (Gwei)",
    "STD Gas Price (Gwei)",
    "Average Priority Fee (Gwei)",
    "STD Priority Fee (Gwei)",
    "Standard Method",
    "Bytesize Method",
    "Status",
    "Error Message",
];

fn mean_cell(stat: Option<&FieldStat>) -> String {
    match stat {
        Some(s) => format!("{}", s.mean),
        None => "undefined".to_string(),
    }
}

fn std_cell(stat: Option<&FieldStat>) -> String {
    match stat {
        Some(s) => format!("{}", s.std_dev),
        None => "undefined".to_string(),
    }
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn row_cells(row: &ContractRow) -> Vec<String> {
    vec![
        escape(&row.contract),
        mean_cell(row.bytecode_size.as_ref()),
        mean_cell(row.eth_price_usd.as_ref()),
        std_cell(row.eth_price_usd.as_ref()),
        mean_cell(row.gas_fees.as_ref()),
        std_cell(row.gas_fees.as_ref()),
        mean_cell(row.deploy_cost_eth.as_ref()),
        std_cell(row.deploy_cost_eth.as_ref()),
        mean_cell(row.deploy_cost_usd.as_ref()),
        std_cell(row.deploy_cost_usd.as_ref()),
        mean_cell(row.gas_price_gwei.as_ref()),
        std_cell(row.gas_price_gwei.as_ref()),
        mean_cell(row.priority_fee_gwei.as_ref()),
        std_cell(row.priority_fee_gwei.as_ref()),
        row.standard_method.to_string(),
        row.bytesize_method.to_string(),
        match row.status {
            RowStatus::Success => "Success".to_string(),
            RowStatus::Undefined => "Error".to_string(),
        },
        escape(row.error_message.as_deref().unwrap_or("")),
    ]
}

/// Render the report as a fixed-column CSV table, one row per contract.
pub fn generate_csv_report(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&HEADER.join(","));
    out.push('\n');
    for row in &report.rows {
        out.push_str(&row_cells(row).join(","));
        out.push('\n');
    }
    out
}
