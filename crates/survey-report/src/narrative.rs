//! Narrative text renderers: `survey_report.txt` and `output_explanation.txt`.

use chrono::NaiveDateTime;

use survey_model::{
    Breakdown, CanonicalField, DataQuality, Insights, NumericField, StatisticsBundle, TopSegment,
};

const RULE_WIDTH: usize = 72;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything the narrative report reads.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub source: &'a str,
    pub generated_at: NaiveDateTime,
    pub stats: &'a StatisticsBundle,
    pub quality: &'a DataQuality,
    pub insights: &'a Insights,
}

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(title.to_string());
    lines.push("=".repeat(RULE_WIDTH));
}

fn value_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

fn share(part: usize, whole: usize) -> String {
    if whole == 0 {
        "n/a".to_string()
    } else {
        format!("{:.1}%", part as f64 / whole as f64 * 100.0)
    }
}

fn column_label(field: NumericField) -> &'static str {
    match field {
        NumericField::Age => "Age",
        NumericField::Satisfaction => "Satisf.",
        NumericField::ProductQuality => "Quality",
        NumericField::CustomerService => "Service",
        NumericField::ValueForMoney => "Value",
        NumericField::Recommend => "Recomm.",
    }
}

const SEGMENT_FIELDS: [NumericField; 5] = [
    NumericField::Satisfaction,
    NumericField::ProductQuality,
    NumericField::CustomerService,
    NumericField::ValueForMoney,
    NumericField::Recommend,
];

/// Fixed-width table of per-category means, one row per group.
pub fn render_segment_table(breakdown: &Breakdown) -> String {
    let mut header = format!("{:<15} {:>6}", "Segment", "Count");
    for field in SEGMENT_FIELDS {
        header.push_str(&format!(" {:>8}", column_label(field)));
    }
    let mut lines = vec![header.clone(), "-".repeat(header.len())];
    for group in &breakdown.groups {
        let mut row = format!("{:<15} {:>6}", group.category, group.count);
        for field in SEGMENT_FIELDS {
            let cell = group
                .mean(field)
                .map_or_else(|| "-".to_string(), |mean| format!("{mean:.2}"));
            row.push_str(&format!(" {cell:>8}"));
        }
        lines.push(row);
    }
    lines.join("\n")
}

fn top_performer(label: &str, segment: Option<&TopSegment>) -> String {
    match segment {
        Some(top) => format!(
            "  {:<27}{} ({:.2}/5 satisfaction, {} responses)",
            format!("{label}:"),
            top.category,
            top.mean_satisfaction,
            top.count
        ),
        None => format!("  {:<27}n/a", format!("{label}:")),
    }
}

fn quality_grade(completion_rate: f64) -> &'static str {
    if completion_rate > 95.0 {
        "A+"
    } else if completion_rate > 90.0 {
        "A"
    } else {
        "B"
    }
}

fn overview(lines: &mut Vec<String>, ctx: &ReportContext<'_>) {
    let stats = ctx.stats;
    heading(lines, "EXECUTIVE SUMMARY");
    lines.push(format!(
        "Report Generated:          {}",
        ctx.generated_at.format(TIMESTAMP_FORMAT)
    ));
    lines.push(format!("Source:                    {}", ctx.source));
    lines.push(format!("Insight Provider:          {}", ctx.insights.provider));
    lines.push(format!("Total Responses:           {}", stats.total_responses));
    let period = stats.date_range.map_or_else(
        || "n/a".to_string(),
        |range| format!("{} to {}", range.first, range.last),
    );
    lines.push(format!("Survey Period:             {period}"));
    lines.push(format!(
        "Data Completeness:         {:.1}%",
        stats.completion_rate
    ));
}

fn indicators(lines: &mut Vec<String>, stats: &StatisticsBundle) {
    heading(lines, "KEY PERFORMANCE INDICATORS");
    lines.push(String::new());
    lines.push("SATISFACTION METRICS:".to_string());
    for field in NumericField::SCORES {
        let Some(summary) = stats.summary(field) else {
            continue;
        };
        lines.push(format!(
            "  {:<26}{} / 5.00  (sd = {}, n = {})",
            format!("{}:", field.field().label()),
            value_or_na(summary.mean),
            value_or_na(summary.std_dev),
            summary.count
        ));
    }
    if let Some(age) = stats.summary(NumericField::Age) {
        lines.push(format!(
            "  {:<26}{} (min {}, max {})",
            "Average Age:",
            value_or_na(age.mean),
            value_or_na(age.min),
            value_or_na(age.max)
        ));
    }
    if let Some(satisfaction) = stats.summary(NumericField::Satisfaction) {
        lines.push(String::new());
        lines.push("  Satisfaction Distribution:".to_string());
        lines.push(format!(
            "    - 25th Percentile:       {}",
            value_or_na(satisfaction.p25)
        ));
        lines.push(format!(
            "    - Median:                {}",
            value_or_na(satisfaction.median)
        ));
        lines.push(format!(
            "    - 75th Percentile:       {}",
            value_or_na(satisfaction.p75)
        ));
    }
    lines.push(String::new());
    lines.push("  Score Counts:".to_string());
    for bucket in &stats.satisfaction_distribution {
        lines.push(format!(
            "    {:<10}{:>5} ({})",
            bucket.category,
            bucket.count,
            share(bucket.count, stats.total_responses)
        ));
    }

    let nps = &stats.nps;
    lines.push(String::new());
    lines.push("NET PROMOTER SCORE (NPS):".to_string());
    lines.push(format!("  Overall NPS:               {}", value_or_na(nps.score)));
    lines.push(format!(
        "  Average Recommendation:    {} / 10.00",
        value_or_na(stats.mean(NumericField::Recommend))
    ));
    lines.push(format!("  Answered:                  {}", nps.answered));
    lines.push(String::new());
    lines.push("  Breakdown:".to_string());
    for (label, count) in [
        ("Promoters (9-10):", nps.promoters),
        ("Passives (7-8):", nps.passives),
        ("Detractors (0-6):", nps.detractors),
    ] {
        lines.push(format!(
            "    - {label:<22}{count:>4} ({})",
            share(count, nps.answered)
        ));
    }

    let sentiment = &stats.sentiment;
    lines.push(String::new());
    lines.push("SENTIMENT ANALYSIS:".to_string());
    for (label, count) in [
        ("Positive Feedback:", sentiment.positive),
        ("Neutral Feedback:", sentiment.neutral),
        ("Negative Feedback:", sentiment.negative),
    ] {
        lines.push(format!(
            "    - {label:<22}{count:>4} ({})",
            share(count, sentiment.total())
        ));
    }
}

fn segments(lines: &mut Vec<String>, stats: &StatisticsBundle) {
    heading(lines, "SEGMENT ANALYSIS");
    for (title, breakdown) in [
        ("PERFORMANCE BY AGE GROUP:", &stats.age_group_breakdown),
        ("PERFORMANCE BY REGION:", &stats.regional_breakdown),
        ("PERFORMANCE BY GENDER:", &stats.gender_breakdown),
    ] {
        lines.push(String::new());
        lines.push(title.to_string());
        lines.push(render_segment_table(breakdown));
    }
    lines.push(String::new());
    lines.push("TOP PERFORMERS:".to_string());
    lines.push(top_performer("Best Region", stats.best_region.as_ref()));
    lines.push(top_performer("Best Age Group", stats.top_age_group.as_ref()));
}

fn insight_sections(lines: &mut Vec<String>, insights: &Insights) {
    heading(
        lines,
        &format!("AI-POWERED INSIGHTS ({})", insights.provider.to_uppercase()),
    );
    for (title, body) in [
        ("EXECUTIVE SUMMARY:", &insights.summary),
        ("TREND ANALYSIS:", &insights.trends),
        ("STRATEGIC RECOMMENDATIONS:", &insights.recommendations),
    ] {
        lines.push(String::new());
        lines.push(title.to_string());
        lines.push(body.trim().to_string());
    }
}

/// Data-quality assessment lines.
pub fn render_quality_section(quality: &DataQuality, completion_rate: f64) -> String {
    let mut lines = vec![
        format!("Input Rows:                {}", quality.input_rows),
        format!("Skipped Rows:              {}", quality.skipped_count()),
        format!("Coercion Warnings:         {}", quality.warning_count()),
    ];
    for (field, count) in &quality.coercion_warnings {
        lines.push(format!("  - {:<24}{count}", format!("{}:", field.as_str())));
    }
    if !quality.unmapped_columns.is_empty() {
        lines.push("Unmapped Columns:".to_string());
        for column in &quality.unmapped_columns {
            match (column.closest_field, column.similarity) {
                (Some(field), Some(similarity)) => lines.push(format!(
                    "  - {} (closest: {}, similarity {similarity:.2})",
                    column.column,
                    field.as_str()
                )),
                _ => lines.push(format!("  - {}", column.column)),
            }
        }
    }
    if !quality.missing_fields.is_empty() {
        let missing: Vec<&str> = quality
            .missing_fields
            .iter()
            .map(CanonicalField::as_str)
            .collect();
        lines.push(format!("Fields Not Found:          {}", missing.join(", ")));
    }
    if quality.empty_dataset {
        lines.push("Dataset:                   EMPTY (no responses after reading)".to_string());
    }
    lines.push(format!("Data Completeness:         {completion_rate:.2}%"));
    lines.push(format!(
        "Quality Grade:             {}",
        quality_grade(completion_rate)
    ));
    lines.join("\n")
}

const STATISTICAL_NOTES: [&str; 5] = [
    "- NPS calculated as: % Promoters - % Detractors, over answered responses",
    "- Standard deviation (sd) is the population standard deviation",
    "- Percentiles use linear interpolation between closest ranks",
    "- Segment tables show mean scores; the CSV exports add std dev and counts",
    "- Completeness counts present values over the mapped fields",
];

/// Renders the full `survey_report.txt` text.
pub fn render_report(ctx: &ReportContext<'_>) -> String {
    let mut lines = vec![
        "=".repeat(RULE_WIDTH),
        "COMPREHENSIVE SURVEY ANALYSIS REPORT".to_string(),
        "=".repeat(RULE_WIDTH),
    ];
    overview(&mut lines, ctx);
    indicators(&mut lines, ctx.stats);
    segments(&mut lines, ctx.stats);
    insight_sections(&mut lines, ctx.insights);

    heading(&mut lines, "DATA QUALITY ASSESSMENT");
    lines.push(render_quality_section(ctx.quality, ctx.stats.completion_rate));

    heading(&mut lines, "STATISTICAL NOTES");
    lines.extend(STATISTICAL_NOTES.iter().map(|note| (*note).to_string()));
    lines.push(String::new());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Renders `output_explanation.txt` around the provider's explanation.
pub fn render_explanation(provider: &str, generated_at: NaiveDateTime, body: &str) -> String {
    let rule = "=".repeat(80);
    format!(
        "OUTPUT FILES EXPLANATION\n{rule}\nGenerated by: {provider}\nDate: {}\n{rule}\n\n{}\n",
        generated_at.format(TIMESTAMP_FORMAT),
        body.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_guard_zero_totals() {
        assert_eq!(share(1, 0), "n/a");
        assert_eq!(share(1, 4), "25.0%");
        assert_eq!(value_or_na(None), "n/a");
        assert_eq!(value_or_na(Some(2.0)), "2.00");
    }

    #[test]
    fn grade_thresholds() {
        assert_eq!(quality_grade(96.0), "A+");
        assert_eq!(quality_grade(95.0), "A");
        assert_eq!(quality_grade(90.0), "B");
    }
}
