//! Chart dashboard for a survey analysis run.
//!
//! One SVG with eight panels: the satisfaction histogram, mean scores per
//! metric, the NPS split, satisfaction per region, metrics per age group,
//! the recommend histogram, the weekly satisfaction trend and the metric
//! correlation heatmap. SVG text needs no system fonts, so rendering works
//! on headless machines.

mod dashboard;
mod error;
mod series;

use std::fs;
use std::path::Path;
use std::time::Instant;

use plotters::prelude::*;
use tracing::{info, info_span};

use survey_model::{ResponseSet, StatisticsBundle};

pub use dashboard::DASHBOARD_TITLE;
pub use error::{ChartError, Result};
pub use series::{
    WeeklyPoint, correlation_matrix, pearson, recommend_histogram, weekly_satisfaction,
};

pub const DASHBOARD_FILE: &str = "survey_visualizations.svg";

/// Canvas size in pixels.
pub const DASHBOARD_SIZE: (u32, u32) = (1800, 1350);

/// Renders the dashboard to an SVG document.
pub fn render_dashboard(stats: &StatisticsBundle, responses: &ResponseSet) -> Result<String> {
    let span = info_span!("render_dashboard", responses = responses.len());
    let _guard = span.enter();
    let start = Instant::now();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, DASHBOARD_SIZE).into_drawing_area();
        dashboard::draw_dashboard(&root, stats, responses.responses())?;
        root.present()?;
    }

    info!(
        bytes = svg.len(),
        duration_ms = start.elapsed().as_millis(),
        "dashboard rendered"
    );
    Ok(svg)
}

/// Renders the dashboard and writes it to `path`.
pub fn write_dashboard(
    path: &Path,
    stats: &StatisticsBundle,
    responses: &ResponseSet,
) -> Result<()> {
    let svg = render_dashboard(stats, responses)?;
    fs::write(path, svg).map_err(|source| ChartError::Write {
        path: path.to_path_buf(),
        source,
    })
}
