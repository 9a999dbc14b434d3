use crate::audited::AuditedTable;

/// Both tables produced by one audit call.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditReport {
    /// Every input record with the audit columns.
    pub audited: AuditedTable,
    /// Records whose status is `ISSUE`.
    pub issues: AuditedTable,
}

impl AuditReport {
    pub fn total(&self) -> usize {
        self.audited.len()
    }

    pub fn ok_count(&self) -> usize {
        self.audited.len() - self.issues.len()
    }

    /// Records whose status is `OK` (the complement of `issues`).
    pub fn ok(&self) -> AuditedTable {
        split_ok(&self.audited)
    }
}

pub fn split_issues(audited: &AuditedTable) -> AuditedTable {
    audited.filter(|r| r.is_issue())
}

pub fn split_ok(audited: &AuditedTable) -> AuditedTable {
    audited.filter(|r| !r.is_issue())
}

/// `(issues, ok)`; every record lands in exactly one side.
pub fn partition(audited: &AuditedTable) -> (AuditedTable, AuditedTable) {
    (split_issues(audited), split_ok(audited))
}
