//! Survey source readers.
//!
//! Reads one input file into a [`RawTable`]:
//!
//! - **Delimited text**: CSV and TSV through the `csv` crate
//! - **Workbooks**: first worksheet of xlsx/xls/ods files through `calamine`
//! - **Document exports**: plain text, or the text layer of a PDF through
//!   `lopdf`, segmented into response fragments
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use survey_ingest::read_source;
//!
//! let table = read_source(Path::new("responses.xlsx"), None)?;
//! println!("{} rows, {} skipped", table.row_count(), table.skipped_count());
//! ```

#![deny(unsafe_code)]

mod delimited;
mod document;
mod error;
mod format;
mod sample;
mod tabular;
mod workbook;

use std::path::Path;
use std::time::Instant;

use tracing::{info, info_span};

use survey_model::{DocumentKind, RawTable, SourceFormat, TabularKind};

// === Error Types ===
pub use error::{IngestError, Result};

// === Format Detection ===
pub use format::detect_format;

// === Readers ===
pub use delimited::read_delimited;
pub use document::{parse_document, read_pdf_document, read_text_document};
pub use sample::{SAMPLE_SOURCE, sample_table};
pub use workbook::read_workbook;

/// Reads one source file; a declared format overrides extension detection.
pub fn read_source(path: &Path, declared: Option<SourceFormat>) -> Result<RawTable> {
    let format = match declared {
        Some(format) => format,
        None => detect_format(path)?,
    };
    let span = info_span!("read_source", path = %path.display(), format = %format);
    let _guard = span.enter();
    let start = Instant::now();

    let table = match format {
        SourceFormat::Tabular(TabularKind::Delimited { delimiter }) => {
            read_delimited(path, delimiter, format)?
        }
        SourceFormat::Tabular(TabularKind::Workbook) => read_workbook(path)?,
        SourceFormat::Document(DocumentKind::Text) => read_text_document(path)?,
        SourceFormat::Document(DocumentKind::Pdf) => read_pdf_document(path)?,
    };

    info!(
        columns = table.headers().len(),
        rows = table.row_count(),
        skipped = table.skipped_count(),
        duration_ms = start.elapsed().as_millis(),
        "source read"
    );
    Ok(table)
}

/// Reads the bundled sample dataset.
pub fn read_sample() -> Result<RawTable> {
    let start = Instant::now();
    let table = sample_table()?;
    info!(
        source = SAMPLE_SOURCE,
        rows = table.row_count(),
        duration_ms = start.elapsed().as_millis(),
        "sample dataset loaded"
    );
    Ok(table)
}
