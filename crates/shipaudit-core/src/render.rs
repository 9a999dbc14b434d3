use shipaudit_types::{AuditReceipt, IssueEntry};

pub fn render_markdown_for_receipt(receipt: &AuditReceipt) -> String {
    let status = if receipt.has_issues() { "ISSUES" } else { "OK" };

    let mut out = String::new();
    out.push_str(&format!("## shipaudit: {status}\n\n"));

    out.push_str(&format!(
        "Audited **{}** row(s) from `{}` (weight tolerance: `{}` kg)\n\n",
        receipt.counts.total,
        escape_md(&receipt.input.source),
        receipt.weight_tolerance_kg
    ));

    out.push_str("| Total rows | Issues | OK | Issue rate |\n");
    out.push_str("|---:|---:|---:|---:|\n");
    out.push_str(&format!(
        "| {} | {} | {} | {:.1}% |\n\n",
        receipt.counts.total, receipt.counts.issues, receipt.counts.ok, receipt.issue_rate_pct
    ));

    if receipt.issues.is_empty() {
        out.push_str("No issues found.\n");
        return out;
    }

    out.push_str("**Issues by type:**\n");
    out.push_str(&format!(
        "- Weight mismatch: {}\n",
        receipt.counts.weight_issues
    ));
    out.push_str(&format!(
        "- SLA violation: {}\n\n",
        receipt.counts.sla_issues
    ));

    out.push_str("| Row | Order | Weight diff (kg) | Weight mismatch | SLA violation |\n");
    out.push_str("|---:|---|---:|---|---|\n");
    for e in &receipt.issues {
        out.push_str(&render_issue_row(e));
    }

    out.push('\n');
    out
}

fn render_issue_row(e: &IssueEntry) -> String {
    let diff = e.weight_diff_kg.map(|d| d.to_string()).unwrap_or_default();

    format!(
        "| {row} | `{order}` | {diff} | {weight} | {sla} |\n",
        row = e.row,
        order = escape_md(&e.order_id),
        diff = diff,
        weight = yes_no(e.weight_issue),
        sla = yes_no(e.sla_issue),
    )
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

fn escape_md(s: &str) -> String {
    s.replace('|', "\\|").replace('`', "\\`")
}
