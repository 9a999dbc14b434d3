//! Common test fixtures for shipaudit.
//!
//! Sample shipment tables, configs and receipts used across the workspace.

use shipaudit_domain::Table;
use shipaudit_types::{
    AUDIT_SCHEMA_V1, AuditCounts, AuditReceipt, ConfigFile, Defaults, FailOn, InputMeta,
    IssueEntry, REQUIRED_COLUMNS, ToolMeta,
};

// =============================================================================
// Sample Shipments
// =============================================================================

/// Ten shipments with three issues: SO-1004 (weight), SO-1007 and SO-1009 (SLA).
///
/// Kept identical to `data/sample_shipments.csv`.
pub const SAMPLE_SHIPMENTS_CSV: &str = "\
order_id,carrier,weight_kg,declared_weight_kg,delivery_days,sla_days
SO-1001,DHL,2.5,2.5,2,3
SO-1002,UPS,4.0,4.0,3,3
SO-1003,FedEx,1.2,1.2,1,2
SO-1004,DHL,6.0,5.0,2,3
SO-1005,UPS,3.3,3.3,2,2
SO-1006,FedEx,7.5,7.5,4,5
SO-1007,DHL,2.0,2.0,5,3
SO-1008,UPS,8.1,8.1,1,2
SO-1009,FedEx,0.9,0.9,4,3
SO-1010,DHL,5.5,5.5,2,4
";

pub const SAMPLE_ISSUE_ORDER_IDS: [&str; 3] = ["SO-1004", "SO-1007", "SO-1009"];

/// Collection of sample shipment tables for testing.
pub mod sample_tables {
    use super::*;

    /// Header only.
    pub fn empty() -> Table {
        Table::from_rows(REQUIRED_COLUMNS, Vec::<[&str; 5]>::new()).expect("valid table")
    }

    /// One row per scenario: exact match, small mismatch, late delivery.
    pub fn scenarios() -> Table {
        Table::from_rows(
            REQUIRED_COLUMNS,
            [
                ["A1", "5.0", "5.0", "2", "3"],
                ["A2", "5.2", "5.0", "2", "3"],
                ["A3", "5.0", "5.0", "4", "3"],
            ],
        )
        .expect("valid table")
    }

    /// Missing `sla_days` and `declared_weight_kg`.
    pub fn missing_columns() -> Table {
        Table::from_rows(
            ["order_id", "weight_kg", "delivery_days"],
            [["A1", "5.0", "2"]],
        )
        .expect("valid table")
    }
}

// =============================================================================
// Sample Configs
// =============================================================================

pub mod sample_configs {
    use super::*;

    pub fn empty() -> ConfigFile {
        ConfigFile::default()
    }

    pub fn built_in() -> ConfigFile {
        ConfigFile::built_in()
    }

    /// Strict CI setup: tolerance of 0.1 kg, fail on any issue.
    pub fn strict() -> ConfigFile {
        ConfigFile {
            defaults: Defaults {
                input: Some("data/shipments.csv".to_string()),
                output: Some("out/issues.csv".to_string()),
                full_output: Some("out/audited.csv".to_string()),
                weight_tolerance_kg: Some(0.1),
                fail_on: Some(FailOn::Issue),
                only_issues: Some(true),
                include_weight: Some(true),
                include_sla: Some(true),
            },
        }
    }
}

// =============================================================================
// Sample Receipts
// =============================================================================

pub mod sample_receipts {
    use super::*;

    fn tool() -> ToolMeta {
        ToolMeta {
            name: "shipaudit".to_string(),
            version: "0.1.0".to_string(),
        }
    }

    pub fn clean() -> AuditReceipt {
        AuditReceipt {
            schema: AUDIT_SCHEMA_V1.to_string(),
            tool: tool(),
            input: InputMeta {
                source: "-".to_string(),
                rows: 0,
                columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            },
            weight_tolerance_kg: 0.0,
            counts: AuditCounts::default(),
            issue_rate_pct: 0.0,
            issues: vec![],
        }
    }

    pub fn with_issues() -> AuditReceipt {
        AuditReceipt {
            schema: AUDIT_SCHEMA_V1.to_string(),
            tool: tool(),
            input: InputMeta {
                source: "data/sample_shipments.csv".to_string(),
                rows: 10,
                columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            },
            weight_tolerance_kg: 0.0,
            counts: AuditCounts {
                total: 10,
                ok: 8,
                issues: 2,
                weight_issues: 1,
                sla_issues: 1,
            },
            issue_rate_pct: 20.0,
            issues: vec![
                IssueEntry {
                    row: 4,
                    order_id: "SO-1004".to_string(),
                    weight_diff_kg: Some(1.0),
                    weight_issue: true,
                    sla_issue: false,
                },
                IssueEntry {
                    row: 7,
                    order_id: "SO-1007".to_string(),
                    weight_diff_kg: None,
                    weight_issue: false,
                    sla_issue: true,
                },
            ],
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Writes a table as CSV, quoting fields that need it.
pub fn table_to_csv(table: &Table) -> String {
    let mut out = String::new();
    push_line(&mut out, table.columns());
    for row in table.rows() {
        push_line(&mut out, row);
    }
    out
}

fn push_line(out: &mut String, cells: &[String]) {
    let line: Vec<String> = cells
        .iter()
        .map(|c| {
            if c.contains([',', '"', '\n', '\r']) {
                format!("\"{}\"", c.replace('"', "\"\""))
            } else {
                c.clone()
            }
        })
        .collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_csv_has_ten_rows() {
        assert_eq!(SAMPLE_SHIPMENTS_CSV.lines().count(), 11);
    }

    #[test]
    fn table_to_csv_quotes_specials() {
        let t = Table::from_rows(["a", "b"], [["x,y", "say \"hi\""]]).unwrap();
        assert_eq!(table_to_csv(&t), "a,b\n\"x,y\",\"say \"\"hi\"\"\"\n");
    }
}
