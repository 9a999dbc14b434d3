use shipaudit_domain::{AuditedRecord, AuditedTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("enable at least one issue type: weight mismatch and/or SLA violation")]
    NoIssueTypeSelected,
}

/// Row selection for the interactive view.
///
/// With exactly one issue type enabled, only rows carrying that flag are
/// shown, whether or not `only_issues` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueFilter {
    pub only_issues: bool,
    pub include_weight: bool,
    pub include_sla: bool,
}

impl Default for IssueFilter {
    fn default() -> Self {
        Self {
            only_issues: true,
            include_weight: true,
            include_sla: true,
        }
    }
}

impl IssueFilter {
    pub fn validate(&self) -> Result<(), FilterError> {
        if !self.include_weight && !self.include_sla {
            return Err(FilterError::NoIssueTypeSelected);
        }
        Ok(())
    }

    pub fn matches(&self, record: &AuditedRecord) -> bool {
        if self.only_issues && !record.is_issue() {
            return false;
        }
        match (self.include_weight, self.include_sla) {
            (true, false) => record.flags.weight_issue,
            (false, true) => record.flags.sla_issue,
            _ => true,
        }
    }

    pub fn select(&self, audited: &AuditedTable) -> Result<AuditedTable, FilterError> {
        self.validate()?;
        Ok(audited.filter(|r| self.matches(r)))
    }
}
