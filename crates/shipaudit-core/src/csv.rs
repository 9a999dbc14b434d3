//! CSV ingest and CSV/TSV output renderers.
//!
//! Input is read with the `csv` crate. Output follows RFC 4180 for CSV and
//! backslash escapes for TSV.

use std::io::Read;

use shipaudit_domain::{AuditedTable, Table, TableError};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum TableReadError {
    #[error("input has no header row")]
    EmptyInput,

    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Reads a headed CSV table. Cells are kept verbatim.
pub fn read_table<R: Read>(reader: R) -> Result<Table, TableReadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(TableReadError::EmptyInput);
    }
    let columns: Vec<String> = headers.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        rows.push(rec.iter().map(str::to_string).collect());
    }

    debug!("read {} row(s) x {} column(s)", rows.len(), columns.len());
    Ok(Table::new(columns, rows)?)
}

pub fn parse_table(text: &str) -> Result<Table, TableReadError> {
    read_table(text.as_bytes())
}

/// Renders an audited table (or any sub-table of it) as CSV.
pub fn render_csv_for_table(table: &AuditedTable) -> String {
    render_delimited(table, ',', escape_csv_field)
}

/// Renders an audited table as TSV.
pub fn render_tsv_for_table(table: &AuditedTable) -> String {
    render_delimited(table, '\t', escape_tsv_field)
}

fn render_delimited(table: &AuditedTable, sep: char, escape: fn(&str) -> String) -> String {
    let mut out = String::new();

    push_row(&mut out, table.columns().iter().map(String::as_str), sep, escape);
    for row in table.rendered_rows() {
        push_row(&mut out, row.iter().map(|c| &**c), sep, escape);
    }

    out
}

fn push_row<'a>(
    out: &mut String,
    cells: impl Iterator<Item = &'a str>,
    sep: char,
    escape: fn(&str) -> String,
) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(sep);
        }
        out.push_str(&escape(cell));
    }
    out.push('\n');
}

/// Escapes a field for CSV according to RFC 4180.
///
/// Fields containing commas, double quotes, or newlines are quoted.
/// Double quotes within the field are escaped by doubling them.
fn escape_csv_field(s: &str) -> String {
    let needs_quoting = s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r');

    if needs_quoting {
        let escaped = s.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        s.to_string()
    }
}

/// Escapes a field for TSV.
fn escape_tsv_field(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\t', "\\t")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
