//! Shared assembly of tabular records into a [`RawTable`].

use tracing::warn;

use survey_model::{RawTable, SkippedRow, SourceFormat};

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_blank(record: &[String]) -> bool {
    record.iter().all(|value| value.trim().is_empty())
}

/// Builds a table from `(line, values)` records.
///
/// The first non-blank record is the header. Blank records are ignored. A
/// record whose field count differs from the header is dropped and recorded.
pub(crate) fn assemble_table<I>(source: &str, format: SourceFormat, records: I) -> RawTable
where
    I: IntoIterator<Item = (u64, Vec<String>)>,
{
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for (line, record) in records {
        if is_blank(&record) {
            continue;
        }
        let Some(header) = headers.as_ref() else {
            headers = Some(record.iter().map(|value| normalize_header(value)).collect());
            continue;
        };
        if record.len() != header.len() {
            warn!(
                source,
                line,
                expected = header.len(),
                found = record.len(),
                "skipping row with mismatched field count"
            );
            skipped.push(SkippedRow {
                line,
                expected_fields: header.len(),
                found_fields: record.len(),
            });
            continue;
        }
        rows.push(record);
    }

    RawTable::new(source, format, headers.unwrap_or_default(), rows, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: u64, values: &[&str]) -> (u64, Vec<String>) {
        (line, values.iter().map(|v| (*v).to_string()).collect())
    }

    #[test]
    fn skips_mismatched_and_ignores_blank_rows() {
        let table = assemble_table(
            "inline",
            SourceFormat::CSV,
            vec![
                record(1, &["", ""]),
                record(2, &[" Age ", "Region\u{feff}"]),
                record(3, &["25", "North"]),
                record(4, &["", " "]),
                record(5, &["34"]),
                record(6, &["41", "South"]),
            ],
        );
        assert_eq!(table.headers(), &["Age".to_string(), "Region".to_string()]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.skipped_count(), 1);
        assert_eq!(table.skipped()[0].line, 5);
        assert_eq!(table.skipped()[0].found_fields, 1);
    }

    #[test]
    fn header_only_yields_zero_rows() {
        let table = assemble_table("inline", SourceFormat::CSV, vec![record(1, &["a", "b"])]);
        assert_eq!(table.headers().len(), 2);
        assert_eq!(table.row_count(), 0);
    }
}
