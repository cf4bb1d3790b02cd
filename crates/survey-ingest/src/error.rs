//! Error types for survey source reading.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions that prevent a source file from being read.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid UTF-8 text.
    #[error("file is not valid UTF-8 text: {path}")]
    InvalidEncoding { path: PathBuf },

    // === Format Errors ===
    /// Extension does not select a known format.
    #[error("unsupported input format '{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// File has no non-whitespace content.
    #[error("input file is empty: {path}")]
    EmptyFile { path: PathBuf },

    /// Failed to parse delimited text.
    #[error("failed to parse delimited text {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to open or read a workbook.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Workbook contains no worksheet.
    #[error("workbook has no worksheet: {path}")]
    NoWorksheet { path: PathBuf },

    /// Failed to load a PDF document.
    #[error("failed to read PDF {path}: {message}")]
    Pdf { path: PathBuf, message: String },

    /// PDF has no extractable text layer.
    #[error("PDF has no text layer: {path}")]
    NoText { path: PathBuf },
}

impl IngestError {
    pub(crate) fn from_io(path: &std::path::Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
