use std::borrow::Cow;

use shipaudit_types::{
    AuditStatus, COL_AUDIT_STATUS, COL_SLA_ISSUE, COL_WEIGHT_DIFF_KG, COL_WEIGHT_ISSUE,
};

use crate::evaluate::{AuditFlags, ShipmentRecord};

/// A column computed by the audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DerivedColumn {
    WeightDiffKg,
    WeightIssue,
    SlaIssue,
    AuditStatus,
}

impl DerivedColumn {
    pub const ALL: [DerivedColumn; 4] = [
        DerivedColumn::WeightDiffKg,
        DerivedColumn::WeightIssue,
        DerivedColumn::SlaIssue,
        DerivedColumn::AuditStatus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DerivedColumn::WeightDiffKg => COL_WEIGHT_DIFF_KG,
            DerivedColumn::WeightIssue => COL_WEIGHT_ISSUE,
            DerivedColumn::SlaIssue => COL_SLA_ISSUE,
            DerivedColumn::AuditStatus => COL_AUDIT_STATUS,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn render(self, flags: &AuditFlags) -> String {
        match self {
            DerivedColumn::WeightDiffKg => flags
                .weight_diff_kg
                .map(|d| d.to_string())
                .unwrap_or_default(),
            DerivedColumn::WeightIssue => flags.weight_issue.to_string(),
            DerivedColumn::SlaIssue => flags.sla_issue.to_string(),
            DerivedColumn::AuditStatus => flags.audit_status.as_str().to_string(),
        }
    }
}

/// Where an output column's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Input(usize),
    Derived(DerivedColumn),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditedRecord {
    /// 0-based position in the input table.
    pub row: usize,
    pub shipment: ShipmentRecord,
    /// Input cells, untouched.
    pub cells: Vec<String>,
    pub flags: AuditFlags,
}

impl AuditedRecord {
    pub fn status(&self) -> AuditStatus {
        self.flags.audit_status
    }

    pub fn is_issue(&self) -> bool {
        self.flags.audit_status.is_issue()
    }

    pub fn cell(&self, slot: Slot) -> Cow<'_, str> {
        match slot {
            Slot::Input(i) => {
                Cow::Borrowed(self.cells.get(i).map(String::as_str).unwrap_or(""))
            }
            Slot::Derived(c) => Cow::Owned(c.render(&self.flags)),
        }
    }
}

/// The input table plus the four audit columns.
///
/// Input columns keep their order; derived columns follow them. An input
/// column that already carries a derived name keeps its position and is
/// recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditedTable {
    columns: Vec<String>,
    slots: Vec<Slot>,
    records: Vec<AuditedRecord>,
}

impl AuditedTable {
    pub(crate) fn from_input(input_columns: &[String], records: Vec<AuditedRecord>) -> Self {
        let mut columns = Vec::with_capacity(input_columns.len() + DerivedColumn::ALL.len());
        let mut slots = Vec::with_capacity(columns.capacity());

        for (i, name) in input_columns.iter().enumerate() {
            columns.push(name.clone());
            slots.push(match DerivedColumn::from_name(name) {
                Some(d) => Slot::Derived(d),
                None => Slot::Input(i),
            });
        }

        for d in DerivedColumn::ALL {
            if !slots.contains(&Slot::Derived(d)) {
                columns.push(d.name().to_string());
                slots.push(Slot::Derived(d));
            }
        }

        Self {
            columns,
            slots,
            records,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[AuditedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rendered cells of one record, in column order.
    pub fn render_record<'a>(&self, record: &'a AuditedRecord) -> Vec<Cow<'a, str>> {
        self.slots.iter().map(|s| record.cell(*s)).collect()
    }

    pub fn rendered_rows(&self) -> impl Iterator<Item = Vec<Cow<'_, str>>> + '_ {
        self.records.iter().map(|r| self.render_record(r))
    }

    /// Sub-table of the records matching `keep`, same columns, same order.
    pub fn filter<F>(&self, keep: F) -> AuditedTable
    where
        F: Fn(&AuditedRecord) -> bool,
    {
        AuditedTable {
            columns: self.columns.clone(),
            slots: self.slots.clone(),
            records: self.records.iter().filter(|r| keep(*r)).cloned().collect(),
        }
    }

    pub fn count_where<F>(&self, pred: F) -> usize
    where
        F: Fn(&AuditedRecord) -> bool,
    {
        self.records.iter().filter(|r| pred(*r)).count()
    }
}
