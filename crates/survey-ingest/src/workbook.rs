//! Spreadsheet workbook reading (first worksheet only).

use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto};

use survey_model::{RawTable, SourceFormat, TabularKind, format_number};

use crate::error::{IngestError, Result};
use crate::tabular::assemble_table;

/// Reads the first worksheet of an xlsx/xlsm/xls/ods workbook.
pub fn read_workbook(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let first_row = u64::from(range.start().map_or(0, |(row, _)| row));
    let records: Vec<(u64, Vec<String>)> = range
        .rows()
        .enumerate()
        .map(|(idx, row)| {
            (
                first_row + idx as u64 + 1,
                row.iter().map(cell_text).collect(),
            )
        })
        .collect();
    let width = records
        .iter()
        .map(|(_, row)| used_width(row))
        .find(|width| *width > 0)
        .unwrap_or(0);
    let records: Vec<(u64, Vec<String>)> = records
        .into_iter()
        .map(|(line, row)| (line, fit_to_header(row, width)))
        .collect();

    if records
        .iter()
        .all(|(_, row)| row.iter().all(|value| value.trim().is_empty()))
    {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    Ok(assemble_table(
        &path.display().to_string(),
        SourceFormat::Tabular(TabularKind::Workbook),
        records,
    ))
}

/// Number of cells up to the last non-blank one.
fn used_width(row: &[String]) -> usize {
    row.iter()
        .rposition(|value| !value.trim().is_empty())
        .map_or(0, |idx| idx + 1)
}

/// Drops the blank padding a worksheet range adds past the header width.
///
/// A row with values beyond the header keeps them and is skipped as a
/// field-count mismatch.
fn fit_to_header(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.truncate(used_width(&row).max(width));
    row
}

/// Text form of a cell; whole floats lose their `.0` and dates become ISO.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(value) | Data::DateTimeIso(value) | Data::DurationIso(value) => value.clone(),
        Data::Float(value) => format_number(*value),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(_) => cell
            .as_date()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| cell.to_string()),
    }
}
