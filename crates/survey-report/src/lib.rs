//! Output bundle writers for a survey analysis run.
//!
//! Every renderer reads the same [`ResponseSet`] and [`StatisticsBundle`],
//! so the numbers agree across files:
//!
//! - **statistics.json** / **data_quality.json**: serialized model types
//! - **survey_data.csv**: the normalized responses under canonical headers
//! - **age_group_analysis.csv**, **regional_analysis.csv**,
//!   **gender_analysis.csv**: per-category means, std devs and counts
//! - **survey_report.txt**: the narrative report
//! - **output_explanation.txt**: provider commentary on the bundle

mod error;
mod json;
mod narrative;
mod tables;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, info_span};

use survey_model::{ResponseSet, StatisticsBundle};

pub use error::{ReportError, Result};
pub use json::write_json;
pub use narrative::{
    ReportContext, render_explanation, render_quality_section, render_report,
    render_segment_table,
};
pub use tables::{
    breakdown_frame, responses_frame, write_breakdown_csv, write_frame_csv, write_responses_csv,
};

pub const STATISTICS_FILE: &str = "statistics.json";
pub const DATA_QUALITY_FILE: &str = "data_quality.json";
pub const RESPONSES_FILE: &str = "survey_data.csv";
pub const AGE_GROUP_FILE: &str = "age_group_analysis.csv";
pub const REGIONAL_FILE: &str = "regional_analysis.csv";
pub const GENDER_FILE: &str = "gender_analysis.csv";
pub const REPORT_FILE: &str = "survey_report.txt";
pub const EXPLANATION_FILE: &str = "output_explanation.txt";

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Inputs for one output bundle.
#[derive(Debug, Clone, Copy)]
pub struct OutputBundle<'a> {
    pub context: ReportContext<'a>,
    pub responses: &'a ResponseSet,
    /// Provider text for `output_explanation.txt`.
    pub explanation: &'a str,
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes every bundle file into `dir`, creating it when needed.
///
/// Returns the written paths in a fixed order.
pub fn write_outputs(dir: &Path, bundle: &OutputBundle<'_>) -> Result<Vec<PathBuf>> {
    let span = info_span!("write_outputs", dir = %dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let stats: &StatisticsBundle = bundle.context.stats;
    let mut written = Vec::with_capacity(8);

    let path = dir.join(STATISTICS_FILE);
    write_json(&path, stats)?;
    written.push(path);

    let path = dir.join(DATA_QUALITY_FILE);
    write_json(&path, bundle.context.quality)?;
    written.push(path);

    let path = dir.join(RESPONSES_FILE);
    write_responses_csv(&path, bundle.responses)?;
    written.push(path);

    for (name, breakdown) in [
        (AGE_GROUP_FILE, &stats.age_group_breakdown),
        (REGIONAL_FILE, &stats.regional_breakdown),
        (GENDER_FILE, &stats.gender_breakdown),
    ] {
        let path = dir.join(name);
        write_breakdown_csv(&path, breakdown)?;
        written.push(path);
    }

    let path = dir.join(REPORT_FILE);
    write_text(&path, &render_report(&bundle.context))?;
    written.push(path);

    let path = dir.join(EXPLANATION_FILE);
    write_text(
        &path,
        &render_explanation(
            &bundle.context.insights.provider,
            bundle.context.generated_at,
            bundle.explanation,
        ),
    )?;
    written.push(path);

    info!(
        files = written.len(),
        duration_ms = start.elapsed().as_millis(),
        "output bundle written"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round2(4.56789), 4.57);
        assert_eq!(round2(2.005 + 1e-9), 2.01);
        assert_eq!(round2(-1.234), -1.23);
    }
}
