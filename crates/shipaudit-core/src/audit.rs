use shipaudit_domain::{
    AuditReport, AuditedTable, SchemaError, Table, ToleranceError, WeightTolerance, audit,
};
use shipaudit_types::{AUDIT_SCHEMA_V1, AuditCounts, AuditReceipt, FailOn, InputMeta, ToolMeta};
use tracing::{debug, info};

use crate::render::render_markdown_for_receipt;
use crate::summary::{count_report, issue_entries, issue_rate_pct};
use crate::view::{FilterError, IssueFilter};

#[derive(Debug, Clone, PartialEq)]
pub struct AuditPlan {
    /// Label for the input in the receipt (a path, or `-` for stdin).
    pub source: String,
    pub weight_tolerance_kg: f64,
    pub fail_on: FailOn,
    pub filter: IssueFilter,
}

impl Default for AuditPlan {
    fn default() -> Self {
        Self {
            source: "-".to_string(),
            weight_tolerance_kg: 0.0,
            fail_on: FailOn::Never,
            filter: IssueFilter::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditRun {
    pub report: AuditReport,
    /// Rows selected by the plan's filter.
    pub view: AuditedTable,
    pub receipt: AuditReceipt,
    pub markdown: String,
    pub exit_code: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

pub fn run_audit(plan: &AuditPlan, table: &Table) -> Result<AuditRun, AuditError> {
    let tolerance = WeightTolerance::new(plan.weight_tolerance_kg)?;
    let report = audit(table, tolerance)?;
    let view = plan.filter.select(&report.audited)?;

    let counts = count_report(&report);
    info!(
        total = counts.total,
        issues = counts.issues,
        weight_issues = counts.weight_issues,
        sla_issues = counts.sla_issues,
        "audit finished"
    );
    debug!("view selected {} of {} row(s)", view.len(), report.total());

    let receipt = AuditReceipt {
        schema: AUDIT_SCHEMA_V1.to_string(),
        tool: ToolMeta {
            name: "shipaudit".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputMeta {
            source: plan.source.clone(),
            rows: counts.total,
            columns: table.columns().to_vec(),
        },
        weight_tolerance_kg: tolerance.kg(),
        issue_rate_pct: issue_rate_pct(&counts),
        issues: issue_entries(&report.issues),
        counts,
    };

    let markdown = render_markdown_for_receipt(&receipt);
    let exit_code = compute_exit_code(plan.fail_on, &receipt.counts);

    Ok(AuditRun {
        report,
        view,
        receipt,
        markdown,
        exit_code,
    })
}

pub fn compute_exit_code(fail_on: FailOn, counts: &AuditCounts) -> i32 {
    match fail_on {
        FailOn::Never => 0,
        FailOn::Issue if counts.issues > 0 => 2,
        FailOn::Issue => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[[&str; 5]]) -> Table {
        Table::from_rows(
            [
                "order_id",
                "weight_kg",
                "declared_weight_kg",
                "delivery_days",
                "sla_days",
            ],
            rows.iter().map(|r| r.iter().copied()),
        )
        .unwrap()
    }

    fn plan(fail_on: FailOn, tol: f64) -> AuditPlan {
        AuditPlan {
            source: "shipments.csv".to_string(),
            weight_tolerance_kg: tol,
            fail_on,
            filter: IssueFilter::default(),
        }
    }

    #[test]
    fn exit_code_semantics() {
        let none = AuditCounts::default();
        let some = AuditCounts {
            total: 3,
            ok: 2,
            issues: 1,
            weight_issues: 1,
            sla_issues: 0,
        };

        assert_eq!(compute_exit_code(FailOn::Never, &none), 0);
        assert_eq!(compute_exit_code(FailOn::Never, &some), 0);
        assert_eq!(compute_exit_code(FailOn::Issue, &none), 0);
        assert_eq!(compute_exit_code(FailOn::Issue, &some), 2);
    }

    #[test]
    fn run_audit_builds_receipt() {
        let t = table(&[["A1", "5.2", "5.0", "2", "3"], ["A2", "5", "5", "1", "3"]]);
        let run = run_audit(&plan(FailOn::Issue, 0.0), &t).unwrap();

        assert_eq!(run.receipt.schema, AUDIT_SCHEMA_V1);
        assert_eq!(run.receipt.input.source, "shipments.csv");
        assert_eq!(run.receipt.input.rows, 2);
        assert_eq!(run.receipt.counts.issues, 1);
        assert_eq!(run.receipt.issue_rate_pct, 50.0);
        assert_eq!(run.receipt.issues[0].order_id, "A1");
        assert_eq!(run.view.len(), 1);
        assert_eq!(run.exit_code, 2);
        assert!(run.markdown.contains("`A1`"));
    }

    #[test]
    fn tolerance_clears_small_mismatch() {
        let t = table(&[["A1", "5.2", "5.0", "2", "3"]]);
        let run = run_audit(&plan(FailOn::Issue, 0.2), &t).unwrap();

        assert_eq!(run.receipt.counts.issues, 0);
        assert_eq!(run.exit_code, 0);
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let t = table(&[["A1", "5", "5", "1", "3"]]);
        let err = run_audit(&plan(FailOn::Never, -0.1), &t).unwrap_err();
        assert!(matches!(err, AuditError::Tolerance(ToleranceError::Negative(_))));
    }

    #[test]
    fn missing_columns_surface_as_schema_error() {
        let t = Table::from_rows(["order_id", "weight_kg"], [["A1", "5"]]).unwrap();
        let err = run_audit(&AuditPlan::default(), &t).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required columns: [declared_weight_kg, delivery_days, sla_days]"
        );
    }

    #[test]
    fn empty_filter_is_rejected() {
        let t = table(&[["A1", "5", "5", "1", "3"]]);
        let mut p = AuditPlan::default();
        p.filter.include_weight = false;
        p.filter.include_sla = false;

        let err = run_audit(&p, &t).unwrap_err();
        assert!(matches!(err, AuditError::Filter(FilterError::NoIssueTypeSelected)));
    }
}
