//! Input format detection.

use std::path::Path;

use survey_model::{DocumentKind, SourceFormat, TabularKind};

use crate::error::{IngestError, Result};

/// Selects the source format from the file extension (case-insensitive).
pub fn detect_format(path: &Path) -> Result<SourceFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => Ok(SourceFormat::CSV),
        "tsv" => Ok(SourceFormat::TSV),
        "xlsx" | "xlsm" | "xls" | "ods" => Ok(SourceFormat::Tabular(TabularKind::Workbook)),
        "txt" | "text" | "md" => Ok(SourceFormat::Document(DocumentKind::Text)),
        "pdf" => Ok(SourceFormat::Document(DocumentKind::Pdf)),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_by_extension() {
        assert_eq!(detect_format(Path::new("a.CSV")).unwrap(), SourceFormat::CSV);
        assert_eq!(detect_format(Path::new("a.tsv")).unwrap(), SourceFormat::TSV);
        assert_eq!(
            detect_format(Path::new("dir/export.xlsx")).unwrap(),
            SourceFormat::Tabular(TabularKind::Workbook)
        );
        assert_eq!(
            detect_format(Path::new("notes.md")).unwrap(),
            SourceFormat::Document(DocumentKind::Text)
        );
        assert_eq!(
            detect_format(Path::new("scan.pdf")).unwrap(),
            SourceFormat::Document(DocumentKind::Pdf)
        );
    }

    #[test]
    fn rejects_unknown_extensions() {
        let err = detect_format(Path::new("survey.json")).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedFormat { ref extension, .. } if extension == "json"
        ));
        assert!(detect_format(Path::new("no_extension")).is_err());
    }
}
