//! Analysis run with explicit stages.
//!
//! 1. **Ingest**: read the input file (or the built-in sample)
//! 2. **Normalize**: map columns and coerce values
//! 3. **Statistics**: compute the bundle once
//! 4. **Render**: AI commentary, exports, the narrative report and the charts
//! 5. **Manifest**: record provenance next to the outputs

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};
use tracing::{info, info_span};

use survey_chart::{DASHBOARD_FILE, write_dashboard};
use survey_ingest::{SAMPLE_SOURCE, read_sample, read_source};
use survey_insight::{InsightProvider, collect_insights, explain_outputs};
use survey_model::RawTable;
use survey_report::{
    AGE_GROUP_FILE, DATA_QUALITY_FILE, EXPLANATION_FILE, GENDER_FILE, OutputBundle,
    REGIONAL_FILE, REPORT_FILE, RESPONSES_FILE, ReportContext, STATISTICS_FILE, write_json,
    write_outputs,
};
use survey_stats::compute_statistics;
use survey_transform::{NormalizationOptions, normalize};

use crate::config::RunConfig;
use crate::types::{RunManifest, RunResult};

pub const MANIFEST_FILE: &str = "run_manifest.json";
const RUN_DIR_PREFIX: &str = "analysis_";

/// Files of a run folder with a short description each.
pub const OUTPUT_FILES: [(&str, &str); 10] = [
    (REPORT_FILE, "narrative report with KPIs, segments and AI insights"),
    (STATISTICS_FILE, "every computed metric as JSON"),
    (DATA_QUALITY_FILE, "skipped rows, coercion warnings and unmapped columns"),
    (RESPONSES_FILE, "normalized responses under canonical column names"),
    (AGE_GROUP_FILE, "mean, std dev and count per age group"),
    (REGIONAL_FILE, "mean, std dev and count per region"),
    (GENDER_FILE, "mean, std dev and count per gender"),
    (EXPLANATION_FILE, "AI explanation of this output bundle"),
    (DASHBOARD_FILE, "eight-panel chart dashboard of scores, segments, trend and correlations"),
    (MANIFEST_FILE, "input fingerprint, timestamps and file list"),
];

/// Hex SHA-256 of a file, read in chunks.
pub fn file_sha256(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let read = reader
            .read(&mut buffer)
            .with_context(|| format!("read {}", path.display()))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Creates `root/analysis_<stamp>`, adding `_2`, `_3`... if it already exists.
pub fn create_run_dir(root: &Path, started_at: DateTime<Local>) -> Result<PathBuf> {
    fs::create_dir_all(root).with_context(|| format!("create {}", root.display()))?;
    let stamp = started_at.format("%Y%m%d_%H%M%S").to_string();
    let mut candidate = root.join(format!("{RUN_DIR_PREFIX}{stamp}"));
    let mut suffix = 2;
    loop {
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(error) if error.kind() == std::io::ErrorKind::AlreadyExists => {
                candidate = root.join(format!("{RUN_DIR_PREFIX}{stamp}_{suffix}"));
                suffix += 1;
            }
            Err(error) => {
                return Err(error).with_context(|| format!("create {}", candidate.display()));
            }
        }
    }
}

fn ingest(config: &RunConfig) -> Result<(RawTable, Option<String>)> {
    match &config.input {
        Some(path) => {
            let table = read_source(path, config.format)
                .with_context(|| format!("read {}", path.display()))?;
            let digest = file_sha256(path)?;
            Ok((table, Some(digest)))
        }
        None => Ok((read_sample().context("load sample dataset")?, None)),
    }
}

/// Runs every stage and writes the output bundle.
pub fn run_analysis(config: &RunConfig, provider: &dyn InsightProvider) -> Result<RunResult> {
    let started_at = Local::now();
    let source = config
        .input
        .as_ref()
        .map_or_else(|| SAMPLE_SOURCE.to_string(), |p| p.display().to_string());
    let run_span = info_span!("run", source = %source);
    let _run_guard = run_span.enter();
    let start = Instant::now();

    // Stage 1: ingest
    let (table, input_sha256) = ingest(config)?;
    let input_format = config.input.as_ref().map(|_| table.format());

    // Stage 2: normalize
    let options = NormalizationOptions::default().with_log_values(config.log_data);
    let outcome = normalize(&table, &options);

    // Stage 3: statistics
    let stats = compute_statistics(&outcome.responses);

    // Stage 4: render
    let insights = collect_insights(provider, &stats);
    let file_names: Vec<String> = OUTPUT_FILES
        .iter()
        .map(|(name, about)| format!("{name} - {about}"))
        .collect();
    let explanation = explain_outputs(provider, &stats, &file_names);

    let output_dir = create_run_dir(&config.output_root, started_at)?;
    let mut files = write_outputs(
        &output_dir,
        &OutputBundle {
            context: ReportContext {
                source: &source,
                generated_at: started_at.naive_local(),
                stats: &stats,
                quality: &outcome.quality,
                insights: &insights,
            },
            responses: &outcome.responses,
            explanation: &explanation,
        },
    )
    .with_context(|| format!("write outputs to {}", output_dir.display()))?;

    let dashboard_path = output_dir.join(DASHBOARD_FILE);
    write_dashboard(&dashboard_path, &stats, &outcome.responses)
        .with_context(|| format!("write {}", dashboard_path.display()))?;
    files.push(dashboard_path);

    // Stage 5: manifest
    let manifest_path = output_dir.join(MANIFEST_FILE);
    files.push(manifest_path.clone());
    let manifest = RunManifest {
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        source: source.clone(),
        input_path: config.input.clone(),
        input_format,
        input_sha256,
        started_at,
        finished_at: Local::now(),
        responses: outcome.responses.len(),
        skipped_rows: outcome.quality.skipped_count(),
        coercion_warnings: outcome.quality.warning_count(),
        insight_provider: insights.provider.clone(),
        files: files
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect(),
    };
    write_json(&manifest_path, &manifest)
        .with_context(|| format!("write {}", manifest_path.display()))?;

    info!(
        output_dir = %output_dir.display(),
        responses = outcome.responses.len(),
        files = files.len(),
        duration_ms = start.elapsed().as_millis(),
        "analysis complete"
    );

    Ok(RunResult {
        output_dir,
        source,
        files,
        stats,
        quality: outcome.quality,
        insight_provider: insights.provider,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sha256_of_known_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.csv");
        fs::write(&path, b"hello world").unwrap();
        assert_eq!(
            file_sha256(&path).unwrap(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn run_dirs_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let at = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let first = create_run_dir(dir.path(), at).unwrap();
        let second = create_run_dir(dir.path(), at).unwrap();
        assert_eq!(first.file_name().unwrap(), "analysis_20240501_093000");
        assert_eq!(second.file_name().unwrap(), "analysis_20240501_093000_2");
    }
}
