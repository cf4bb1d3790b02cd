//! Prompt construction from aggregate statistics only.

use std::fmt;

use survey_model::{NumericField, StatisticsBundle, TopSegment};

/// One narrative section requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsightKind {
    Summary,
    Trends,
    Recommendations,
}

impl InsightKind {
    pub const ALL: [InsightKind; 3] = [
        InsightKind::Summary,
        InsightKind::Trends,
        InsightKind::Recommendations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Summary => "summary",
            InsightKind::Trends => "trends",
            InsightKind::Recommendations => "recommendations",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn num(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"))
}

fn pct(part: usize, whole: usize) -> String {
    if whole == 0 {
        "n/a".to_string()
    } else {
        format!("{:.1}%", part as f64 / whole as f64 * 100.0)
    }
}

fn segment(segment: Option<&TopSegment>) -> String {
    segment.map_or_else(
        || "n/a".to_string(),
        |top| format!("{} ({:.2}/5.0)", top.category, top.mean_satisfaction),
    )
}

fn loyalty_lines(stats: &StatisticsBundle) -> Vec<String> {
    let nps = &stats.nps;
    vec![
        format!("- Net Promoter Score (NPS): {}", num(nps.score)),
        format!(
            "- Promoters: {} ({})",
            nps.promoters,
            pct(nps.promoters, nps.answered)
        ),
        format!(
            "- Passives: {} ({})",
            nps.passives,
            pct(nps.passives, nps.answered)
        ),
        format!(
            "- Detractors: {} ({})",
            nps.detractors,
            pct(nps.detractors, nps.answered)
        ),
    ]
}

fn summary_prompt(stats: &StatisticsBundle) -> Vec<String> {
    let mut lines = vec![
        "You are an expert data analyst. Write an executive summary of this customer survey."
            .to_string(),
        String::new(),
        "SURVEY DATA:".to_string(),
        format!("- Total Responses: {}", stats.total_responses),
    ];
    for field in NumericField::SCORES {
        lines.push(format!(
            "- {}: {}/5.0",
            field.field().label(),
            num(stats.mean(field))
        ));
    }
    lines.extend(loyalty_lines(stats));
    lines.push(format!(
        "- Best Performing Region: {}",
        segment(stats.best_region.as_ref())
    ));
    lines.extend([
        String::new(),
        "Write 4-5 sentences that cover the overall performance level, the strongest metric,"
            .to_string(),
        "the biggest opportunity for improvement, customer loyalty as shown by the NPS, and any"
            .to_string(),
        "notable regional or demographic pattern. Use a business-professional tone.".to_string(),
    ]);
    lines
}

fn trends_prompt(stats: &StatisticsBundle) -> Vec<String> {
    let mut lines = vec![
        "You are a data analyst. Identify the critical trends in these survey metrics.".to_string(),
        String::new(),
        "DETAILED METRICS:".to_string(),
    ];
    for field in NumericField::SCORES {
        let summary = stats.summary(field);
        lines.push(format!(
            "- {}: {}/5.0 (Std Dev: {})",
            field.field().label(),
            num(summary.and_then(|s| s.mean)),
            num(summary.and_then(|s| s.std_dev))
        ));
    }
    lines.push(format!("- Net Promoter Score: {}", num(stats.nps.score)));
    lines.push(format!(
        "- Average Recommendation Score: {}/10.0",
        num(stats.mean(NumericField::Recommend))
    ));
    lines.extend([
        String::new(),
        "SEGMENT PERFORMANCE:".to_string(),
        format!("- Top Age Group: {}", segment(stats.top_age_group.as_ref())),
        format!("- Top Region: {}", segment(stats.best_region.as_ref())),
    ]);
    if let Some(satisfaction) = stats.summary(NumericField::Satisfaction) {
        lines.extend([
            String::new(),
            "SATISFACTION DISTRIBUTION:".to_string(),
            format!("- 25th Percentile: {}", num(satisfaction.p25)),
            format!("- Median: {}", num(satisfaction.median)),
            format!("- 75th Percentile: {}", num(satisfaction.p75)),
        ]);
    }
    let sentiment = &stats.sentiment;
    lines.extend([
        String::new(),
        format!(
            "FEEDBACK SENTIMENT: {} positive, {} neutral, {} negative",
            sentiment.positive, sentiment.neutral, sentiment.negative
        ),
        String::new(),
        "Identify 5-6 trends. For each, describe what the data shows, why it matters, and"
            .to_string(),
        "any relationship with other metrics. Format as a numbered list.".to_string(),
    ]);
    lines
}

fn recommendations_prompt(stats: &StatisticsBundle) -> Vec<String> {
    let quality = stats.mean(NumericField::ProductQuality);
    let service = stats.mean(NumericField::CustomerService);
    let gap = quality.zip(service).map(|(q, s)| (q - s).abs());
    let mut lines = vec![
        "You are a strategic business consultant. Recommend actions based on this survey."
            .to_string(),
        String::new(),
        "CURRENT PERFORMANCE:".to_string(),
        format!(
            "- Overall Satisfaction: {}/5.0",
            num(stats.overall_mean_score)
        ),
    ];
    lines.extend(loyalty_lines(stats));
    lines.extend([
        String::new(),
        "METRIC GAPS:".to_string(),
        format!("- Quality vs Service Gap: {} points", num(gap)),
        format!(
            "- Value Perception: {}/5.0",
            num(stats.mean(NumericField::ValueForMoney))
        ),
        format!("- Best Region: {}", segment(stats.best_region.as_ref())),
        String::new(),
        "Provide 6-8 recommendations grouped as IMMEDIATE ACTIONS (0-30 days), SHORT-TERM"
            .to_string(),
        "INITIATIVES (30-90 days) and LONG-TERM STRATEGY (90+ days). For each give the action,"
            .to_string(),
        "the supporting data, the expected impact and a priority level.".to_string(),
    ]);
    lines
}

/// Prompt for one insight section.
pub fn build_prompt(kind: InsightKind, stats: &StatisticsBundle) -> String {
    let lines = match kind {
        InsightKind::Summary => summary_prompt(stats),
        InsightKind::Trends => trends_prompt(stats),
        InsightKind::Recommendations => recommendations_prompt(stats),
    };
    lines.join("\n")
}

/// Prompt asking the provider to explain the written output bundle.
pub fn explanation_prompt(stats: &StatisticsBundle, files: &[String]) -> String {
    let mut lines = vec![
        "You are a business analyst explaining survey analysis results to a stakeholder."
            .to_string(),
        String::new(),
        "SURVEY OVERVIEW:".to_string(),
        format!("- Total Responses: {}", stats.total_responses),
        format!(
            "- Average Satisfaction: {}/5.0",
            num(stats.overall_mean_score)
        ),
        format!("- Net Promoter Score: {}", num(stats.nps.score)),
        format!("- Best Region: {}", segment(stats.best_region.as_ref())),
        format!("- Top Age Group: {}", segment(stats.top_age_group.as_ref())),
        String::new(),
        "OUTPUT FILES:".to_string(),
    ];
    lines.extend(
        files
            .iter()
            .enumerate()
            .map(|(idx, file)| format!("{}. {file}", idx + 1)),
    );
    lines.extend([
        String::new(),
        "Explain what each file contains and what a reader learns from it, then close with"
            .to_string(),
        "the key findings and action items. Use clear, non-technical business language."
            .to_string(),
    ]);
    lines.join("\n")
}
