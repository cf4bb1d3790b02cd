//! Dashboard layout and the eight panels.
//!
//! Rows of three panels: satisfaction histogram, metric means and NPS split;
//! regional satisfaction, metrics per age group and the recommend histogram;
//! then the weekly trend across two columns next to the correlation heatmap.

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use survey_model::{Breakdown, NumericField, StatisticsBundle, SurveyResponse, UNKNOWN_CATEGORY};

use crate::series::{correlation_matrix, recommend_histogram, weekly_satisfaction};

pub(crate) type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;
pub(crate) type DrawResult = Result<(), DrawingAreaErrorKind<std::io::Error>>;

pub const DASHBOARD_TITLE: &str = "Survey Analysis Dashboard";

const FONT: &str = "sans-serif";
const TITLE_SIZE: i32 = 36;
const CAPTION_SIZE: i32 = 20;
const LABEL_SIZE: i32 = 13;
/// Upper bound of every 1-5 score axis, with room for value labels.
const SCORE_AXIS_MAX: f64 = 5.5;

const TEAL: RGBColor = RGBColor(0x4E, 0xCD, 0xC4);
const SALMON: RGBColor = RGBColor(0xFF, 0x6B, 0x6B);
const SKY: RGBColor = RGBColor(0x45, 0xB7, 0xD1);
const SAGE: RGBColor = RGBColor(0x96, 0xCE, 0xB4);
const CORAL: RGBColor = RGBColor(0xFF, 0x7F, 0x50);
const PEACH: RGBColor = RGBColor(0xFF, 0xA0, 0x7A);
const MINT: RGBColor = RGBColor(0x90, 0xEE, 0x90);

const SCORE_METRICS: [(NumericField, &str, RGBColor); 4] = [
    (NumericField::Satisfaction, "Satisfaction", SALMON),
    (NumericField::ProductQuality, "Quality", TEAL),
    (NumericField::CustomerService, "Service", SKY),
    (NumericField::ValueForMoney, "Value", SAGE),
];

const AGE_METRICS: [(NumericField, &str, RGBColor); 3] = [
    (NumericField::Satisfaction, "Satisfaction", TEAL),
    (NumericField::ProductQuality, "Quality", SALMON),
    (NumericField::CustomerService, "Service", SKY),
];

/// Draws the full dashboard onto `root`.
pub(crate) fn draw_dashboard(
    root: &Area<'_>,
    stats: &StatisticsBundle,
    responses: &[SurveyResponse],
) -> DrawResult {
    root.fill(&WHITE)?;
    let body = root.titled(DASHBOARD_TITLE, (FONT, TITLE_SIZE))?;
    let rows = body.split_evenly((3, 1));
    let top = rows[0].split_evenly((1, 3));
    let middle = rows[1].split_evenly((1, 3));
    let (bottom_width, _) = rows[2].dim_in_pixel();
    let (trend_area, heatmap_area) = rows[2].split_horizontally(bottom_width as i32 * 2 / 3);

    satisfaction_panel(&top[0], stats)?;
    metric_means_panel(&top[1], stats)?;
    nps_panel(&top[2], stats)?;
    region_panel(&middle[0], &stats.regional_breakdown)?;
    age_group_panel(&middle[1], &stats.age_group_breakdown)?;
    recommend_panel(&middle[2], stats, responses)?;
    trend_panel(&trend_area, responses)?;
    correlation_panel(&heatmap_area, responses)
}

// === Helpers ===

/// Category index of a segment label position.
fn segment_index(value: &SegmentValue<u32>) -> Option<usize> {
    match value {
        SegmentValue::CenterOf(idx) | SegmentValue::Exact(idx) => Some(*idx as usize),
        SegmentValue::Last => None,
    }
}

fn segment_label(value: &SegmentValue<u32>, labels: &[String]) -> String {
    segment_index(value)
        .and_then(|idx| labels.get(idx))
        .cloned()
        .unwrap_or_default()
}

/// Last index of a category axis; integer ranges include both ends.
fn last_index(len: usize) -> u32 {
    len.saturating_sub(1).max(1) as u32
}

fn count_axis_max(counts: impl Iterator<Item = f64>) -> f64 {
    (counts.fold(0.0, f64::max) * 1.15).max(1.0)
}

fn centered_text() -> TextStyle<'static> {
    TextStyle::from((FONT, LABEL_SIZE)).pos(Pos::new(HPos::Center, VPos::Center))
}

fn empty_panel(area: &Area<'_>, title: &str) -> DrawResult {
    let inner = area.titled(title, (FONT, CAPTION_SIZE))?;
    let (width, height) = inner.dim_in_pixel();
    inner.draw(&Text::new("No data", (width as i32 / 2, height as i32 / 2), centered_text()))
}

fn titled_with_mean(title: &str, mean: Option<f64>) -> String {
    match mean {
        Some(mean) => format!("{title} (mean {mean:.2})"),
        None => title.to_string(),
    }
}

/// Vertical bars over a category axis.
fn count_bars(
    area: &Area<'_>,
    title: &str,
    x_desc: &str,
    labels: &[String],
    bars: &[(u32, f64, RGBColor)],
) -> DrawResult {
    if bars.iter().all(|(_, count, _)| *count == 0.0) {
        return empty_panel(area, title);
    }
    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(
            (0u32..last_index(labels.len())).into_segmented(),
            0f64..count_axis_max(bars.iter().map(|(_, count, _)| *count)),
        )?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc("Responses")
        .x_label_formatter(&|value| segment_label(value, labels))
        .draw()?;
    for (idx, count, color) in bars {
        chart.draw_series(
            Histogram::vertical(&chart)
                .style(color.filled())
                .margin(6)
                .data([(*idx, *count)]),
        )?;
    }
    Ok(())
}

/// Horizontal bars of 1-5 means with the value printed after each bar.
fn mean_bars(
    area: &Area<'_>,
    title: &str,
    labels: &[String],
    bars: &[(u32, f64, RGBColor)],
) -> DrawResult {
    if bars.is_empty() {
        return empty_panel(area, title);
    }
    let categories = (0u32..last_index(labels.len())).into_segmented();
    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(90)
        .build_cartesian_2d(0f64..SCORE_AXIS_MAX, categories)?;
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Average score")
        .y_label_formatter(&|value| segment_label(value, labels))
        .draw()?;
    for (idx, mean, color) in bars {
        chart.draw_series(
            Histogram::horizontal(&chart)
                .style(color.filled())
                .margin(8)
                .data([(*idx, *mean)]),
        )?;
    }
    let value_style = TextStyle::from((FONT, LABEL_SIZE)).pos(Pos::new(HPos::Left, VPos::Center));
    chart.draw_series(bars.iter().map(|(idx, mean, _)| {
        Text::new(
            format!("{mean:.2}"),
            (*mean + 0.05, SegmentValue::CenterOf(*idx)),
            value_style.clone(),
        )
    }))?;
    Ok(())
}

// === Panels ===

fn satisfaction_panel(area: &Area<'_>, stats: &StatisticsBundle) -> DrawResult {
    let title = titled_with_mean("Overall Satisfaction", stats.overall_mean_score);
    let scores: Vec<(String, usize)> = stats
        .satisfaction_distribution
        .iter()
        .filter(|bucket| bucket.category != UNKNOWN_CATEGORY)
        .map(|bucket| (bucket.category.clone(), bucket.count))
        .collect();
    let labels: Vec<String> = scores.iter().map(|(label, _)| label.clone()).collect();
    let bars: Vec<(u32, f64, RGBColor)> = scores
        .iter()
        .enumerate()
        .map(|(idx, (_, count))| (idx as u32, *count as f64, TEAL))
        .collect();
    count_bars(area, &title, "Score (1-5)", &labels, &bars)
}

fn metric_means_panel(area: &Area<'_>, stats: &StatisticsBundle) -> DrawResult {
    let labels: Vec<String> = SCORE_METRICS
        .iter()
        .map(|(_, label, _)| (*label).to_string())
        .collect();
    let bars: Vec<(u32, f64, RGBColor)> = SCORE_METRICS
        .iter()
        .enumerate()
        .filter_map(|(idx, (field, _, color))| Some((idx as u32, stats.mean(*field)?, *color)))
        .collect();
    mean_bars(area, "Average Scores by Metric", &labels, &bars)
}

fn nps_panel(area: &Area<'_>, stats: &StatisticsBundle) -> DrawResult {
    let nps = &stats.nps;
    let title = match nps.score {
        Some(score) => format!("NPS Distribution (score {score:.1})"),
        None => "NPS Distribution".to_string(),
    };
    let groups = [
        ("Detractors (0-6)", nps.detractors, SALMON),
        ("Passives (7-8)", nps.passives, PEACH),
        ("Promoters (9-10)", nps.promoters, MINT),
    ];
    let labels: Vec<String> = groups.iter().map(|(label, _, _)| (*label).to_string()).collect();
    let bars: Vec<(u32, f64, RGBColor)> = groups
        .iter()
        .enumerate()
        .map(|(idx, (_, count, color))| (idx as u32, *count as f64, *color))
        .collect();
    count_bars(area, &title, "Recommend group", &labels, &bars)
}

fn region_panel(area: &Area<'_>, breakdown: &Breakdown) -> DrawResult {
    let mut regions: Vec<(&str, f64)> = breakdown
        .groups
        .iter()
        .filter_map(|group| {
            let mean = group.mean(NumericField::Satisfaction)?;
            Some((group.category.as_str(), mean))
        })
        .collect();
    regions.sort_by(|a, b| a.1.total_cmp(&b.1));
    let labels: Vec<String> = regions.iter().map(|(name, _)| (*name).to_string()).collect();
    let bars: Vec<(u32, f64, RGBColor)> = regions
        .iter()
        .enumerate()
        .map(|(idx, (_, mean))| (idx as u32, *mean, CORAL))
        .collect();
    mean_bars(area, "Satisfaction by Region", &labels, &bars)
}

fn age_group_panel(area: &Area<'_>, breakdown: &Breakdown) -> DrawResult {
    let title = "Metrics by Age Group";
    let groups: Vec<_> = breakdown
        .groups
        .iter()
        .filter(|group| group.category != UNKNOWN_CATEGORY)
        .collect();
    let has_means = groups
        .iter()
        .any(|group| AGE_METRICS.iter().any(|(field, _, _)| group.mean(*field).is_some()));
    if !has_means {
        return empty_panel(area, title);
    }
    let labels: Vec<String> = groups.iter().map(|group| group.category.clone()).collect();

    let categories = (0u32..last_index(labels.len())).into_segmented();
    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(categories, 0f64..SCORE_AXIS_MAX)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Age group")
        .y_desc("Average score")
        .x_label_formatter(&|value| segment_label(value, &labels))
        .draw()?;

    for (field, label, color) in AGE_METRICS {
        let points: Vec<(SegmentValue<u32>, f64)> = groups
            .iter()
            .enumerate()
            .filter_map(|(idx, group)| {
                Some((SegmentValue::CenterOf(idx as u32), group.mean(field)?))
            })
            .collect();
        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        chart.draw_series(points.into_iter().map(|point| Circle::new(point, 4, color.filled())))?;
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    Ok(())
}

fn recommend_panel(
    area: &Area<'_>,
    stats: &StatisticsBundle,
    responses: &[SurveyResponse],
) -> DrawResult {
    let title = titled_with_mean("Likelihood to Recommend", stats.mean(NumericField::Recommend));
    let labels: Vec<String> = (0..=10).map(|score: u32| score.to_string()).collect();
    let bars: Vec<(u32, f64, RGBColor)> = recommend_histogram(responses)
        .iter()
        .enumerate()
        .map(|(idx, count)| (idx as u32, *count as f64, SAGE))
        .collect();
    count_bars(area, &title, "Score (0-10)", &labels, &bars)
}

fn trend_panel(area: &Area<'_>, responses: &[SurveyResponse]) -> DrawResult {
    let title = "Satisfaction Trend (Weekly Average)";
    let weeks = weekly_satisfaction(responses);
    if weeks.is_empty() {
        return empty_panel(area, title);
    }
    let labels: Vec<String> = weeks
        .iter()
        .map(|week| week.week_ending.format("%Y-%m-%d").to_string())
        .collect();
    let points: Vec<(SegmentValue<u32>, f64)> = weeks
        .iter()
        .enumerate()
        .map(|(idx, week)| (SegmentValue::CenterOf(idx as u32), week.mean_satisfaction))
        .collect();

    let categories = (0u32..last_index(labels.len())).into_segmented();
    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(categories, 0f64..SCORE_AXIS_MAX)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(12)
        .x_desc("Week ending")
        .y_desc("Average satisfaction")
        .x_label_formatter(&|value| segment_label(value, &labels))
        .draw()?;
    chart.draw_series(AreaSeries::new(points.clone(), 0.0, TEAL.mix(0.3).filled()))?;
    chart.draw_series(LineSeries::new(points.clone(), TEAL.stroke_width(2)))?;
    chart.draw_series(points.into_iter().map(|point| Circle::new(point, 4, TEAL.filled())))?;
    Ok(())
}

/// Cool-to-warm fill for a correlation coefficient.
fn heat_color(value: Option<f64>) -> RGBColor {
    const NEUTRAL: (f64, f64, f64) = (247.0, 247.0, 247.0);
    const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);
    let Some(value) = value else {
        return RGBColor(220, 220, 220);
    };
    let (target, weight) = if value < 0.0 {
        (COOL, -value)
    } else {
        (WARM, value)
    };
    let mix = |from: f64, to: f64| (from + (to - from) * weight.clamp(0.0, 1.0)).round() as u8;
    RGBColor(
        mix(NEUTRAL.0, target.0),
        mix(NEUTRAL.1, target.1),
        mix(NEUTRAL.2, target.2),
    )
}

/// Label for a tick at the middle of cell `position - 0.5`.
fn cell_label(position: f64, labels: &[&str]) -> String {
    let idx = position - 0.5;
    if idx < 0.0 || (idx - idx.round()).abs() > 1e-6 {
        return String::new();
    }
    labels
        .get(idx.round() as usize)
        .map(|label| (*label).to_string())
        .unwrap_or_default()
}

fn correlation_panel(area: &Area<'_>, responses: &[SurveyResponse]) -> DrawResult {
    let title = "Metric Correlations";
    let fields = NumericField::SCORES;
    let matrix = correlation_matrix(responses, &fields);
    let has_pairs = matrix.iter().enumerate().any(|(row, values)| {
        values
            .iter()
            .enumerate()
            .any(|(column, value)| row != column && value.is_some())
    });
    if !has_pairs {
        return empty_panel(area, title);
    }
    let labels = ["Satisf.", "Quality", "Service", "Value"];
    let size = fields.len() as f64;
    let ticks = fields.len() * 2 + 1;

    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, CAPTION_SIZE))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..size, 0f64..size)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(ticks)
        .y_labels(ticks)
        .x_label_formatter(&|x| cell_label(*x, &labels))
        .y_label_formatter(&|y| cell_label(size - *y, &labels))
        .draw()?;

    // Row 0 is drawn at the top.
    let cells: Vec<(f64, f64, Option<f64>)> = matrix
        .iter()
        .enumerate()
        .flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .map(move |(column, value)| (column as f64, size - row as f64, *value))
        })
        .collect();
    chart.draw_series(cells.iter().map(|(x, top, value)| {
        Rectangle::new([(*x, *top - 1.0), (*x + 1.0, *top)], heat_color(*value).filled())
    }))?;
    chart.draw_series(cells.iter().map(|(x, top, value)| {
        let text = value.map_or_else(|| "n/a".to_string(), |value| format!("{value:.2}"));
        Text::new(text, (*x + 0.5, *top - 0.5), centered_text())
    }))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_colors_run_from_cool_to_warm() {
        assert_eq!(heat_color(Some(0.0)), RGBColor(247, 247, 247));
        assert_eq!(heat_color(Some(1.0)), RGBColor(180, 4, 38));
        assert_eq!(heat_color(Some(-1.0)), RGBColor(59, 76, 192));
        assert_eq!(heat_color(None), RGBColor(220, 220, 220));
    }

    #[test]
    fn tick_labels_sit_on_cell_centers() {
        let labels = ["a", "b", "c"];
        assert_eq!(cell_label(0.5, &labels), "a");
        assert_eq!(cell_label(2.5, &labels), "c");
        assert_eq!(cell_label(1.0, &labels), "");
        assert_eq!(cell_label(3.5, &labels), "");

        let names = vec!["North".to_string(), "South".to_string()];
        assert_eq!(segment_label(&SegmentValue::CenterOf(1), &names), "South");
        assert_eq!(segment_label(&SegmentValue::Last, &names), "");
        assert_eq!(last_index(1), 1);
        assert_eq!(last_index(7), 6);
    }
}
