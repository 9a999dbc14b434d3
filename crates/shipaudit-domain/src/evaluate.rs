use shipaudit_types::AuditStatus;

use crate::audited::{AuditedRecord, AuditedTable};
use crate::schema::ShipmentColumns;
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ToleranceError {
    #[error("weight tolerance must be >= 0 kg, got {0}")]
    Negative(f64),

    #[error("weight tolerance must be a finite number, got {0}")]
    NotFinite(f64),
}

/// A validated, non-negative weight tolerance in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct WeightTolerance(f64);

impl WeightTolerance {
    pub const ZERO: WeightTolerance = WeightTolerance(0.0);

    pub fn new(kg: f64) -> Result<Self, ToleranceError> {
        if !kg.is_finite() {
            return Err(ToleranceError::NotFinite(kg));
        }
        if kg < 0.0 {
            return Err(ToleranceError::Negative(kg));
        }
        Ok(Self(kg))
    }

    pub fn kg(self) -> f64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }
}

impl TryFrom<f64> for WeightTolerance {
    type Error = ToleranceError;

    fn try_from(kg: f64) -> Result<Self, Self::Error> {
        Self::new(kg)
    }
}

/// The five audited fields of one input row. Numeric fields are `None` when
/// the cell is missing or not a finite number.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentRecord {
    pub order_id: String,
    pub weight_kg: Option<f64>,
    pub declared_weight_kg: Option<f64>,
    pub delivery_days: Option<f64>,
    pub sla_days: Option<f64>,
}

impl ShipmentRecord {
    pub fn from_row(row: &[String], columns: &ShipmentColumns) -> Self {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

        Self {
            order_id: cell(columns.order_id).to_string(),
            weight_kg: parse_measure(cell(columns.weight_kg)),
            declared_weight_kg: parse_measure(cell(columns.declared_weight_kg)),
            delivery_days: parse_measure(cell(columns.delivery_days)),
            sla_days: parse_measure(cell(columns.sla_days)),
        }
    }
}

/// Parses a numeric cell. Empty, unparseable, NaN and infinite cells are missing.
pub fn parse_measure(cell: &str) -> Option<f64> {
    let v: f64 = cell.trim().parse().ok()?;
    v.is_finite().then_some(v)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuditFlags {
    pub weight_diff_kg: Option<f64>,
    pub weight_issue: bool,
    pub sla_issue: bool,
    pub audit_status: AuditStatus,
}

/// Decimal places kept in the rendered `weight_diff_kg` (milligram precision).
pub const WEIGHT_DIFF_DECIMALS: i32 = 6;

/// Absolute weight difference, rounded to [`WEIGHT_DIFF_DECIMALS`] for the
/// report column. The weight rule never reads this value.
pub fn weight_diff_kg(record: &ShipmentRecord) -> Option<f64> {
    let diff = (record.weight_kg? - record.declared_weight_kg?).abs();
    Some(round_kg(diff))
}

fn round_kg(v: f64) -> f64 {
    let scale = 10f64.powi(WEIGHT_DIFF_DECIMALS);
    let scaled = v * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        v
    }
}

/// Weight rule. A positive tolerance compares the unrounded absolute
/// difference strictly against it; a zero tolerance compares the two weights
/// for exact equality. Missing weights are always an issue.
///
/// The positive branch ignores differences within a few ulps of the larger
/// operand, so `5.2 - 5.0` counts as equal to a tolerance of `0.2`.
#[allow(clippy::float_cmp)]
pub fn weight_issue(record: &ShipmentRecord, tolerance: WeightTolerance) -> bool {
    let (Some(measured), Some(declared)) = (record.weight_kg, record.declared_weight_kg) else {
        return true;
    };

    if tolerance.is_positive() {
        let diff = (measured - declared).abs();
        let slack = FLOAT_SLACK_ULPS
            * f64::EPSILON
            * measured.abs().max(declared.abs()).max(tolerance.kg());
        diff - tolerance.kg() > slack
    } else {
        measured != declared
    }
}

/// Rounding allowance, in units of the operands' machine epsilon.
const FLOAT_SLACK_ULPS: f64 = 4.0;

/// SLA rule: delivered strictly later than agreed. Missing days are an issue.
pub fn sla_issue(record: &ShipmentRecord) -> bool {
    match (record.delivery_days, record.sla_days) {
        (Some(delivery), Some(sla)) => delivery > sla,
        _ => true,
    }
}

pub fn evaluate_record(record: &ShipmentRecord, tolerance: WeightTolerance) -> AuditFlags {
    let weight_diff_kg = weight_diff_kg(record);
    let weight_issue = weight_issue(record, tolerance);
    let sla_issue = sla_issue(record);

    AuditFlags {
        weight_diff_kg,
        weight_issue,
        sla_issue,
        audit_status: AuditStatus::from_flags(weight_issue, sla_issue),
    }
}

/// Evaluates every row of a validated table. Row order and all input cells
/// are preserved; the input table is not modified.
pub fn evaluate(
    table: &Table,
    columns: &ShipmentColumns,
    tolerance: WeightTolerance,
) -> AuditedTable {
    let records = table
        .rows()
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            let shipment = ShipmentRecord::from_row(cells, columns);
            let flags = evaluate_record(&shipment, tolerance);
            AuditedRecord {
                row,
                shipment,
                cells: cells.clone(),
                flags,
            }
        })
        .collect();

    AuditedTable::from_input(table.columns(), records)
}
