//! Raw tables as produced by the source readers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout of a tabular source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabularKind {
    /// Delimited text (CSV, TSV, ...).
    Delimited { delimiter: u8 },
    /// Spreadsheet workbook; the first worksheet is read.
    Workbook,
}

/// Container of a document export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Text,
    Pdf,
}

/// Input format, selected once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "variant", rename_all = "snake_case")]
pub enum SourceFormat {
    Tabular(TabularKind),
    Document(DocumentKind),
}

impl SourceFormat {
    pub const CSV: SourceFormat = SourceFormat::Tabular(TabularKind::Delimited { delimiter: b',' });
    pub const TSV: SourceFormat =
        SourceFormat::Tabular(TabularKind::Delimited { delimiter: b'\t' });

    pub fn is_tabular(&self) -> bool {
        matches!(self, SourceFormat::Tabular(_))
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Tabular(TabularKind::Delimited { delimiter: b',' }) => f.write_str("csv"),
            SourceFormat::Tabular(TabularKind::Delimited { delimiter: b'\t' }) => {
                f.write_str("tsv")
            }
            SourceFormat::Tabular(TabularKind::Delimited { delimiter }) => {
                write!(f, "delimited({})", char::from(*delimiter))
            }
            SourceFormat::Tabular(TabularKind::Workbook) => f.write_str("workbook"),
            SourceFormat::Document(DocumentKind::Text) => f.write_str("text"),
            SourceFormat::Document(DocumentKind::Pdf) => f.write_str("pdf"),
        }
    }
}

/// A tabular row dropped because its field count did not match the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line (or worksheet row) of the record in the source.
    pub line: u64,
    pub expected_fields: usize,
    pub found_fields: usize,
}

/// Header plus rows of text values, exactly as read from one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    source: String,
    format: SourceFormat,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    skipped: Vec<SkippedRow>,
}

impl RawTable {
    /// Every row must have exactly `headers.len()` values.
    pub fn new(
        source: impl Into<String>,
        format: SourceFormat,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        skipped: Vec<SkippedRow>,
    ) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == headers.len()));
        Self {
            source: source.into(),
            format,
            headers,
            rows,
            skipped,
        }
    }

    /// Source label (path or `built-in sample`).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Data rows seen in the source, kept or skipped.
    pub fn input_row_count(&self) -> usize {
        self.rows.len() + self.skipped.len()
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_display_short_names() {
        assert_eq!(SourceFormat::CSV.to_string(), "csv");
        assert_eq!(SourceFormat::TSV.to_string(), "tsv");
        assert_eq!(
            SourceFormat::Tabular(TabularKind::Delimited { delimiter: b'|' }).to_string(),
            "delimited(|)"
        );
        assert_eq!(SourceFormat::Document(DocumentKind::Pdf).to_string(), "pdf");
    }

    #[test]
    fn counts_include_skipped_rows() {
        let table = RawTable::new(
            "inline",
            SourceFormat::CSV,
            vec!["a".to_string()],
            vec![vec!["1".to_string()]],
            vec![SkippedRow {
                line: 3,
                expected_fields: 1,
                found_fields: 2,
            }],
        );
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.skipped_count(), 1);
        assert_eq!(table.input_row_count(), 2);
        assert_eq!(table.column_index("a"), Some(0));
    }
}
