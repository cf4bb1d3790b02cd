//! Chart series derived from the normalized responses.
//!
//! The statistics bundle carries aggregates only; the recommend histogram,
//! the weekly trend and the correlation matrix need the per-response values.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use survey_model::{NumericField, SurveyResponse};

/// Mean satisfaction of the responses submitted in one week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyPoint {
    /// Sunday closing the week.
    pub week_ending: NaiveDate,
    pub mean_satisfaction: f64,
    pub responses: usize,
}

/// Counts of recommend answers per rounded score 0-10.
pub fn recommend_histogram(responses: &[SurveyResponse]) -> [usize; 11] {
    let mut counts = [0usize; 11];
    for value in responses.iter().filter_map(|r| r.recommend) {
        counts[value.round().clamp(0.0, 10.0) as usize] += 1;
    }
    counts
}

fn week_ending(date: NaiveDate) -> Option<NaiveDate> {
    let days_to_sunday = 6 - date.weekday().num_days_from_monday();
    date.checked_add_days(Days::new(u64::from(days_to_sunday)))
}

/// Weekly mean satisfaction, oldest week first.
///
/// Responses without a submission date or a satisfaction score are left out.
pub fn weekly_satisfaction(responses: &[SurveyResponse]) -> Vec<WeeklyPoint> {
    let mut weeks: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for response in responses {
        let (Some(date), Some(score)) = (response.submitted_on, response.satisfaction) else {
            continue;
        };
        let Some(week) = week_ending(date) else {
            continue;
        };
        let entry = weeks.entry(week).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }
    weeks
        .into_iter()
        .map(|(week_ending, (sum, count))| WeeklyPoint {
            week_ending,
            mean_satisfaction: sum / count as f64,
            responses: count,
        })
        .collect()
}

/// Pearson correlation; `None` below two pairs or with a constant side.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;
    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// Pairwise-complete correlations between `fields`, row-major.
pub fn correlation_matrix(
    responses: &[SurveyResponse],
    fields: &[NumericField],
) -> Vec<Vec<Option<f64>>> {
    fields
        .iter()
        .map(|row| {
            fields
                .iter()
                .map(|column| {
                    let pairs: Vec<(f64, f64)> = responses
                        .iter()
                        .filter_map(|r| Some((r.numeric(*row)?, r.numeric(*column)?)))
                        .collect();
                    pearson(&pairs)
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(date: &str, satisfaction: Option<f64>) -> SurveyResponse {
        SurveyResponse {
            submitted_on: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            satisfaction,
            ..SurveyResponse::default()
        }
    }

    #[test]
    fn weeks_close_on_sunday() {
        let rows = vec![
            dated("2024-01-01", Some(4.0)),
            dated("2024-01-07", Some(2.0)),
            dated("2024-01-08", Some(5.0)),
            dated("2024-01-09", None),
        ];
        let weeks = weekly_satisfaction(&rows);
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].week_ending.to_string(), "2024-01-07");
        assert_eq!(weeks[0].mean_satisfaction, 3.0);
        assert_eq!(weeks[0].responses, 2);
        assert_eq!(weeks[1].week_ending.to_string(), "2024-01-14");
        assert_eq!(weeks[1].responses, 1);
    }

    #[test]
    fn recommend_scores_are_rounded_into_buckets() {
        let rows: Vec<SurveyResponse> = [Some(9.6), Some(10.0), Some(0.2), None]
            .into_iter()
            .map(|recommend| SurveyResponse {
                recommend,
                ..SurveyResponse::default()
            })
            .collect();
        let counts = recommend_histogram(&rows);
        assert_eq!(counts[10], 2);
        assert_eq!(counts[0], 1);
        assert_eq!(counts.iter().sum::<usize>(), 3);
    }

    #[test]
    fn pearson_handles_degenerate_input() {
        let perfect = [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
        assert!((pearson(&perfect).unwrap() - 1.0).abs() < 1e-12);
        let inverse = [(1.0, 3.0), (2.0, 2.0), (3.0, 1.0)];
        assert!((pearson(&inverse).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&[(1.0, 1.0)]), None);
        assert_eq!(pearson(&[(1.0, 5.0), (2.0, 5.0)]), None);
    }

    #[test]
    fn matrix_uses_pairwise_complete_rows() {
        let rows = vec![
            SurveyResponse {
                satisfaction: Some(1.0),
                product_quality: Some(2.0),
                ..SurveyResponse::default()
            },
            SurveyResponse {
                satisfaction: Some(2.0),
                product_quality: Some(3.0),
                ..SurveyResponse::default()
            },
            SurveyResponse {
                satisfaction: Some(5.0),
                ..SurveyResponse::default()
            },
        ];
        let fields = [NumericField::Satisfaction, NumericField::ProductQuality];
        let matrix = correlation_matrix(&rows, &fields);
        assert_eq!(matrix.len(), 2);
        assert!((matrix[0][1].unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(matrix[0][1], matrix[1][0]);
        assert!(matrix[0][0].is_some());
    }
}
