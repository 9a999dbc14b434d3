//! Domain logic: schema gate + rule evaluation + report split.
//!
//! This crate is designed to be I/O-free and highly testable.

pub mod audited;
pub mod evaluate;
pub mod report;
pub mod schema;
pub mod table;

pub use audited::{AuditedRecord, AuditedTable, DerivedColumn, Slot};
pub use evaluate::{
    AuditFlags, ShipmentRecord, ToleranceError, WEIGHT_DIFF_DECIMALS, WeightTolerance, evaluate,
    evaluate_record, parse_measure, sla_issue, weight_diff_kg, weight_issue,
};
pub use report::{AuditReport, partition, split_issues, split_ok};
pub use schema::{SchemaError, ShipmentColumns, validate_schema};
pub use table::{Table, TableError};

/// Runs the whole audit over one table: schema gate, per-row evaluation,
/// issues split. The input table is left untouched.
pub fn audit(table: &Table, tolerance: WeightTolerance) -> Result<AuditReport, SchemaError> {
    let columns = validate_schema(table)?;
    let audited = evaluate(table, &columns, tolerance);
    let issues = split_issues(&audited);

    Ok(AuditReport { audited, issues })
}
