//! CSV exports built as DataFrames.

use std::fs::File;
use std::path::Path;

use polars::prelude::{
    Column, CsvWriter, DataFrame, IntoColumn, NamedFrom, PolarsResult, SerWriter, Series,
};
use tracing::debug;

use survey_model::{Breakdown, CanonicalField, NumericField, ResponseSet};

use crate::error::{ReportError, Result};
use crate::round2;

fn text_column(name: &str, values: Vec<Option<String>>) -> Column {
    Series::new(name.into(), values).into_column()
}

fn float_column(name: &str, values: Vec<Option<f64>>) -> Column {
    Series::new(name.into(), values).into_column()
}

fn count_column(name: &str, values: Vec<u64>) -> Column {
    Series::new(name.into(), values).into_column()
}

/// One row per response, one column per canonical field in export order.
///
/// Missing values become nulls and are written as empty cells.
pub fn responses_frame(responses: &ResponseSet) -> PolarsResult<DataFrame> {
    let columns = CanonicalField::ALL
        .iter()
        .map(|field| {
            let values = responses
                .iter()
                .map(|response| Some(response.display_value(*field)).filter(|v| !v.is_empty()))
                .collect();
            text_column(field.as_str(), values)
        })
        .collect();
    DataFrame::new(columns)
}

/// One row per category in breakdown order.
///
/// Columns: the dimension, `count`, then `<field>_mean`, `<field>_std` and
/// `<field>_count` for every numeric field. Means are rounded to two places.
pub fn breakdown_frame(breakdown: &Breakdown) -> PolarsResult<DataFrame> {
    let mut columns = vec![
        text_column(
            &breakdown.dimension,
            breakdown
                .groups
                .iter()
                .map(|group| Some(group.category.clone()))
                .collect(),
        ),
        count_column(
            "count",
            breakdown.groups.iter().map(|group| group.count as u64).collect(),
        ),
    ];
    for field in NumericField::ALL {
        let metric = |group: &survey_model::GroupStats| group.metrics.get(&field).copied();
        columns.push(float_column(
            &format!("{}_mean", field.as_str()),
            breakdown
                .groups
                .iter()
                .map(|group| metric(group).and_then(|m| m.mean).map(round2))
                .collect(),
        ));
        columns.push(float_column(
            &format!("{}_std", field.as_str()),
            breakdown
                .groups
                .iter()
                .map(|group| metric(group).and_then(|m| m.std_dev).map(round2))
                .collect(),
        ));
        columns.push(count_column(
            &format!("{}_count", field.as_str()),
            breakdown
                .groups
                .iter()
                .map(|group| metric(group).map_or(0, |m| m.count as u64))
                .collect(),
        ));
    }
    DataFrame::new(columns)
}

/// Writes a frame as a headed CSV file.
pub fn write_frame_csv(path: &Path, frame: &mut DataFrame) -> Result<()> {
    let mut file = File::create(path).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(frame)
        .map_err(|source| ReportError::Frame {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), rows = frame.height(), "wrote csv");
    Ok(())
}

/// Builds and writes `survey_data.csv`.
pub fn write_responses_csv(path: &Path, responses: &ResponseSet) -> Result<()> {
    let mut frame = responses_frame(responses).map_err(|source| ReportError::Frame {
        path: path.to_path_buf(),
        source,
    })?;
    write_frame_csv(path, &mut frame)
}

/// Builds and writes one breakdown CSV.
pub fn write_breakdown_csv(path: &Path, breakdown: &Breakdown) -> Result<()> {
    let mut frame = breakdown_frame(breakdown).map_err(|source| ReportError::Frame {
        path: path.to_path_buf(),
        source,
    })?;
    write_frame_csv(path, &mut frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use survey_model::{GroupMetric, GroupStats, SurveyResponse};

    #[test]
    fn responses_frame_has_canonical_columns() {
        let set = ResponseSet::new(
            vec![
                SurveyResponse {
                    age: Some(31.0),
                    region: "North".to_string(),
                    ..SurveyResponse::default()
                },
                SurveyResponse::default(),
            ],
            BTreeMap::new(),
        );
        let frame = responses_frame(&set).unwrap();
        assert_eq!(frame.height(), 2);
        let names: Vec<&str> = frame.get_column_names().iter().map(|n| n.as_str()).collect();
        let expected: Vec<&str> = CanonicalField::ALL.iter().map(CanonicalField::as_str).collect();
        assert_eq!(names, expected);

        let age = frame.column("age").unwrap().as_materialized_series();
        assert_eq!(age.null_count(), 1);
    }

    #[test]
    fn breakdown_frame_rounds_means() {
        let mut metrics = BTreeMap::new();
        metrics.insert(
            NumericField::Satisfaction,
            GroupMetric {
                count: 3,
                mean: Some(10.0 / 3.0),
                std_dev: Some(0.4714),
            },
        );
        let breakdown = Breakdown {
            dimension: "region".to_string(),
            groups: vec![GroupStats {
                category: "North".to_string(),
                count: 3,
                metrics,
            }],
        };
        let frame = breakdown_frame(&breakdown).unwrap();
        assert_eq!(frame.width(), 2 + NumericField::ALL.len() * 3);
        let mean = frame
            .column("satisfaction_mean")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .get(0);
        assert_eq!(mean, Some(3.33));
        let age_count = frame
            .column("age_count")
            .unwrap()
            .as_materialized_series()
            .u64()
            .unwrap()
            .get(0);
        assert_eq!(age_count, Some(0));
    }
}
