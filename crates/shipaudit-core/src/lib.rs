//! Core engine: orchestrates CSV ingest + audit + reporting.

mod audit;
mod csv;
mod render;
mod summary;
mod view;

pub use audit::{AuditError, AuditPlan, AuditRun, compute_exit_code, run_audit};
pub use self::csv::{
    TableReadError, parse_table, read_table, render_csv_for_table, render_tsv_for_table,
};
pub use render::render_markdown_for_receipt;
pub use summary::{count_report, issue_entries, issue_rate_pct};
pub use view::{FilterError, IssueFilter};
