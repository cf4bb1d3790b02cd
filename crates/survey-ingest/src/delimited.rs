//! Delimited text (CSV/TSV) reading.

use std::path::Path;

use csv::ReaderBuilder;

use survey_model::{RawTable, SourceFormat};

use crate::error::{IngestError, Result};
use crate::tabular::assemble_table;

/// Reads a whole file as UTF-8 text, failing on empty content.
pub(crate) fn read_text_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    let text = String::from_utf8(bytes).map_err(|_| IngestError::InvalidEncoding {
        path: path.to_path_buf(),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text).to_string();
    if text.trim().is_empty() {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    Ok(text)
}

/// Reads a delimited file.
pub fn read_delimited(path: &Path, delimiter: u8, format: SourceFormat) -> Result<RawTable> {
    let text = read_text_file(path)?;
    parse_delimited(&path.display().to_string(), &text, delimiter, format).map_err(|message| {
        IngestError::CsvParse {
            path: path.to_path_buf(),
            message,
        }
    })
}

/// Parses delimited text already in memory.
pub(crate) fn parse_delimited(
    source: &str,
    text: &str,
    delimiter: u8,
    format: SourceFormat,
) -> std::result::Result<RawTable, String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        let line = record.position().map_or(0, csv::Position::line);
        records.push((line, record.iter().map(str::to_string).collect()));
    }
    Ok(assemble_table(source, format, records))
}
