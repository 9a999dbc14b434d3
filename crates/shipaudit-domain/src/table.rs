use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("row {row} has {found} field(s) but the header has {expected}")]
    RaggedRow {
        /// 1-based data row.
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("duplicate column '{column}'")]
    DuplicateColumn { column: String },
}

/// A row-oriented table of raw string cells with named columns.
///
/// Cells are kept exactly as read so that columns the audit does not know
/// about pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        let mut seen = BTreeSet::new();
        for c in &columns {
            if !seen.insert(c.as_str()) {
                return Err(TableError::DuplicateColumn { column: c.clone() });
            }
        }

        for (i, r) in rows.iter().enumerate() {
            if r.len() != columns.len() {
                return Err(TableError::RaggedRow {
                    row: i + 1,
                    expected: columns.len(),
                    found: r.len(),
                });
            }
        }

        Ok(Self { columns, rows })
    }

    /// Convenience constructor for literal tables.
    pub fn from_rows<C, R, S>(columns: C, rows: R) -> Result<Self, TableError>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = columns.into_iter().map(Into::into).collect();
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect())
            .collect();
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }
}
