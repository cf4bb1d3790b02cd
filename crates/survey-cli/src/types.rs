use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

use survey_model::{DataQuality, SourceFormat, StatisticsBundle};

/// Provenance record written as `run_manifest.json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub tool_version: String,
    pub source: String,
    pub input_path: Option<PathBuf>,
    pub input_format: Option<SourceFormat>,
    /// Hex SHA-256 of the input bytes.
    pub input_sha256: Option<String>,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub responses: usize,
    pub skipped_rows: usize,
    pub coercion_warnings: usize,
    pub insight_provider: String,
    pub files: Vec<String>,
}

#[derive(Debug)]
pub struct RunResult {
    pub output_dir: PathBuf,
    pub source: String,
    pub files: Vec<PathBuf>,
    pub stats: StatisticsBundle,
    pub quality: DataQuality,
    pub insight_provider: String,
}
