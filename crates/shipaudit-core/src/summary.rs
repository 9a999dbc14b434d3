use shipaudit_domain::{AuditReport, AuditedTable};
use shipaudit_types::{AuditCounts, IssueEntry};

pub fn count_report(report: &AuditReport) -> AuditCounts {
    let total = report.total();
    let issues = report.issues.len();

    AuditCounts {
        total: total as u64,
        ok: (total - issues) as u64,
        issues: issues as u64,
        weight_issues: report.issues.count_where(|r| r.flags.weight_issue) as u64,
        sla_issues: report.issues.count_where(|r| r.flags.sla_issue) as u64,
    }
}

/// Percentage of flagged rows, 0 when the table is empty.
pub fn issue_rate_pct(counts: &AuditCounts) -> f64 {
    if counts.total == 0 {
        return 0.0;
    }
    counts.issues as f64 / counts.total as f64 * 100.0
}

pub fn issue_entries(issues: &AuditedTable) -> Vec<IssueEntry> {
    issues
        .records()
        .iter()
        .map(|r| IssueEntry {
            row: (r.row + 1) as u64,
            order_id: r.shipment.order_id.clone(),
            weight_diff_kg: r.flags.weight_diff_kg,
            weight_issue: r.flags.weight_issue,
            sla_issue: r.flags.sla_issue,
        })
        .collect()
}
