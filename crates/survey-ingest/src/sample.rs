//! Bundled sample dataset used when no input file is given.

use survey_model::{RawTable, SourceFormat};

use crate::delimited::parse_delimited;
use crate::error::{IngestError, Result};

/// Source label of the bundled dataset.
pub const SAMPLE_SOURCE: &str = "built-in sample";

const SAMPLE_CSV: &str = include_str!("../data/sample_responses.csv");

/// Parses the bundled sample responses through the delimited reader.
pub fn sample_table() -> Result<RawTable> {
    parse_delimited(SAMPLE_SOURCE, SAMPLE_CSV, b',', SourceFormat::CSV).map_err(|message| {
        IngestError::CsvParse {
            path: SAMPLE_SOURCE.into(),
            message,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_parses_without_skips() {
        let table = sample_table().unwrap();
        assert_eq!(table.source(), SAMPLE_SOURCE);
        assert_eq!(table.row_count(), 120);
        assert_eq!(table.skipped_count(), 0);
        assert_eq!(table.headers().len(), 12);
    }
}
