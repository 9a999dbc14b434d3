//! Data types (config + receipts) for shipaudit.
//!
//! This crate is intentionally "dumb": pure DTOs with serde + schemars.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Schema Identifiers ─────────────────────────────────────────
pub const AUDIT_SCHEMA_V1: &str = "shipaudit.audit.v1";

// ── Column Vocabulary ──────────────────────────────────────────
pub const COL_ORDER_ID: &str = "order_id";
pub const COL_WEIGHT_KG: &str = "weight_kg";
pub const COL_DECLARED_WEIGHT_KG: &str = "declared_weight_kg";
pub const COL_DELIVERY_DAYS: &str = "delivery_days";
pub const COL_SLA_DAYS: &str = "sla_days";

pub const COL_WEIGHT_DIFF_KG: &str = "weight_diff_kg";
pub const COL_WEIGHT_ISSUE: &str = "weight_issue";
pub const COL_SLA_ISSUE: &str = "sla_issue";
pub const COL_AUDIT_STATUS: &str = "audit_status";

/// Columns every input table must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_ORDER_ID,
    COL_WEIGHT_KG,
    COL_DECLARED_WEIGHT_KG,
    COL_DELIVERY_DAYS,
    COL_SLA_DAYS,
];

/// Columns added by the audit, in output order.
pub const DERIVED_COLUMNS: [&str; 4] = [
    COL_WEIGHT_DIFF_KG,
    COL_WEIGHT_ISSUE,
    COL_SLA_ISSUE,
    COL_AUDIT_STATUS,
];

// ── Built-in Paths ─────────────────────────────────────────────
pub const DEFAULT_INPUT_PATH: &str = "data/sample_shipments.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "output/audit_report.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum AuditStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ISSUE")]
    Issue,
}

impl AuditStatus {
    /// `Issue` iff either rule fired.
    pub fn from_flags(weight_issue: bool, sla_issue: bool) -> Self {
        if weight_issue || sla_issue {
            AuditStatus::Issue
        } else {
            AuditStatus::Ok
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AuditStatus::Ok => "OK",
            AuditStatus::Issue => "ISSUE",
        }
    }

    pub fn is_issue(self) -> bool {
        matches!(self, AuditStatus::Issue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailOn {
    /// Exit non-zero when at least one record is flagged.
    Issue,
    #[default]
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct InputMeta {
    /// Where the table came from (a path, or `-` for stdin).
    pub source: String,
    pub rows: u64,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct AuditCounts {
    pub total: u64,
    pub ok: u64,
    pub issues: u64,
    pub weight_issues: u64,
    pub sla_issues: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IssueEntry {
    /// 1-based data row (the header is not counted).
    pub row: u64,
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_diff_kg: Option<f64>,
    pub weight_issue: bool,
    pub sla_issue: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditReceipt {
    pub schema: String,
    pub tool: ToolMeta,
    pub input: InputMeta,
    pub weight_tolerance_kg: f64,
    pub counts: AuditCounts,
    /// Share of flagged rows in percent; 0 for an empty table.
    pub issue_rate_pct: f64,
    #[serde(default)]
    pub issues: Vec<IssueEntry>,
}

impl AuditReceipt {
    pub fn has_issues(&self) -> bool {
        self.counts.issues > 0
    }
}

/// The on-disk configuration file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ConfigFile {
    #[serde(default)]
    pub defaults: Defaults,
}

impl ConfigFile {
    pub fn built_in() -> Self {
        Self {
            defaults: Defaults {
                input: Some(DEFAULT_INPUT_PATH.to_string()),
                output: Some(DEFAULT_OUTPUT_PATH.to_string()),
                full_output: None,
                weight_tolerance_kg: Some(0.0),
                fail_on: Some(FailOn::Never),
                only_issues: Some(true),
                include_weight: Some(true),
                include_sla: Some(true),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Defaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Issues-only report path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Full audited dataset path (not written unless set).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_tolerance_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<FailOn>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_issues: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_weight: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_sla: Option<bool>,
}

impl Defaults {
    /// Field-wise overlay: values set in `other` win.
    pub fn overlay(self, other: Defaults) -> Defaults {
        Defaults {
            input: other.input.or(self.input),
            output: other.output.or(self.output),
            full_output: other.full_output.or(self.full_output),
            weight_tolerance_kg: other.weight_tolerance_kg.or(self.weight_tolerance_kg),
            fail_on: other.fail_on.or(self.fail_on),
            only_issues: other.only_issues.or(self.only_issues),
            include_weight: other.include_weight.or(self.include_weight),
            include_sla: other.include_sla.or(self.include_sla),
        }
    }
}
