use std::io;
use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Failures while drawing or saving the dashboard.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to draw the chart dashboard")]
    Draw(#[from] DrawingAreaErrorKind<io::Error>),

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ChartError>;
