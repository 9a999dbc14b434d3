//! Property-based and fixture tests for shipaudit-core.
//!
//! These exercise the engine end to end: CSV text in, receipt and rendered
//! reports out.

use proptest::prelude::*;

use shipaudit_core::{
    AuditPlan, IssueFilter, parse_table, render_csv_for_table, run_audit,
};
use shipaudit_testkit::{
    SAMPLE_ISSUE_ORDER_IDS, SAMPLE_SHIPMENTS_CSV, arb_fail_on, arb_shipment_table, arb_tolerance,
    sample_tables, table_to_csv, validate_audit_receipt,
};
use shipaudit_types::{DERIVED_COLUMNS, FailOn};

fn plan(tol: f64, fail_on: FailOn) -> AuditPlan {
    AuditPlan {
        source: "generated.csv".to_string(),
        weight_tolerance_kg: tol,
        fail_on,
        filter: IssueFilter::default(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn csv_text_round_trips_into_the_same_table(t in arb_shipment_table()) {
        let back = parse_table(&table_to_csv(&t)).unwrap();
        prop_assert_eq!(back, t);
    }

    #[test]
    fn counts_are_consistent(t in arb_shipment_table(), tol in arb_tolerance()) {
        let run = run_audit(&plan(tol, FailOn::Never), &t).unwrap();
        let c = &run.receipt.counts;

        prop_assert_eq!(c.total as usize, t.len());
        prop_assert_eq!(c.ok + c.issues, c.total);
        prop_assert!(c.weight_issues <= c.issues);
        prop_assert!(c.sla_issues <= c.issues);
        prop_assert!(c.weight_issues + c.sla_issues >= c.issues);
        prop_assert_eq!(run.receipt.issues.len(), c.issues as usize);
        prop_assert!((0.0..=100.0).contains(&run.receipt.issue_rate_pct));
    }

    #[test]
    fn exit_code_follows_fail_on(
        t in arb_shipment_table(),
        tol in arb_tolerance(),
        fail_on in arb_fail_on(),
    ) {
        let run = run_audit(&plan(tol, fail_on), &t).unwrap();
        let expected = if fail_on == FailOn::Issue && run.receipt.has_issues() { 2 } else { 0 };
        prop_assert_eq!(run.exit_code, expected);
    }

    #[test]
    fn receipts_match_their_schema(t in arb_shipment_table(), tol in arb_tolerance()) {
        let run = run_audit(&plan(tol, FailOn::Never), &t).unwrap();
        prop_assert!(validate_audit_receipt(&run.receipt).is_ok());
    }

    #[test]
    fn issues_report_reads_back_with_derived_columns(
        t in arb_shipment_table(),
        tol in arb_tolerance(),
    ) {
        let run = run_audit(&plan(tol, FailOn::Never), &t).unwrap();
        let back = parse_table(&render_csv_for_table(&run.report.issues)).unwrap();

        prop_assert_eq!(back.len(), run.report.issues.len());
        prop_assert_eq!(&back.columns()[..t.columns().len()], t.columns());
        prop_assert_eq!(&back.columns()[t.columns().len()..], &DERIVED_COLUMNS[..]);

        let status = back.column_index("audit_status").unwrap();
        prop_assert!(back.rows().iter().all(|r| r[status] == "ISSUE"));
    }

    #[test]
    fn default_view_equals_the_issues(t in arb_shipment_table()) {
        let run = run_audit(&plan(0.0, FailOn::Never), &t).unwrap();
        prop_assert_eq!(&run.view, &run.report.issues);
    }
}

#[test]
fn sample_dataset_has_three_issues() {
    let table = parse_table(SAMPLE_SHIPMENTS_CSV).unwrap();
    let run = run_audit(&plan(0.0, FailOn::Issue), &table).unwrap();

    assert_eq!(run.receipt.counts.total, 10);
    assert_eq!(run.receipt.counts.issues, 3);
    assert_eq!(run.receipt.counts.ok, 7);
    assert_eq!(run.receipt.counts.weight_issues, 1);
    assert_eq!(run.receipt.counts.sla_issues, 2);
    assert_eq!(run.receipt.issue_rate_pct, 30.0);
    assert_eq!(run.exit_code, 2);

    let ids: Vec<&str> = run
        .receipt
        .issues
        .iter()
        .map(|e| e.order_id.as_str())
        .collect();
    assert_eq!(ids, SAMPLE_ISSUE_ORDER_IDS);

    let csv = render_csv_for_table(&run.report.issues);
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with(
        "order_id,carrier,weight_kg,declared_weight_kg,delivery_days,sla_days,weight_diff_kg,weight_issue,sla_issue,audit_status\n"
    ));
    assert!(csv.contains("SO-1004,DHL,6.0,5.0,2,3,1,true,false,ISSUE\n"));
}

#[test]
fn empty_table_audits_cleanly() {
    let run = run_audit(&plan(0.0, FailOn::Issue), &sample_tables::empty()).unwrap();

    assert_eq!(run.receipt.counts.total, 0);
    assert_eq!(run.receipt.issue_rate_pct, 0.0);
    assert_eq!(run.exit_code, 0);
    assert!(run.markdown.ends_with("No issues found.\n"));
}

#[test]
fn scenarios_table() {
    let run = run_audit(&plan(0.0, FailOn::Never), &sample_tables::scenarios()).unwrap();
    let ids: Vec<&str> = run
        .receipt
        .issues
        .iter()
        .map(|e| e.order_id.as_str())
        .collect();
    assert_eq!(ids, vec!["A2", "A3"]);

    let run = run_audit(&plan(0.2, FailOn::Never), &sample_tables::scenarios()).unwrap();
    assert_eq!(run.receipt.counts.issues, 1);
}

#[test]
fn missing_columns_fail_before_any_output() {
    let err = run_audit(&plan(0.0, FailOn::Never), &sample_tables::missing_columns()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "missing required columns: [declared_weight_kg, sla_days]"
    );
}
